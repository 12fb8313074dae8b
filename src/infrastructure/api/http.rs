//! REST order source

use std::time::Duration;

use tracing::debug;

use crate::domain::{Order, StatusFilter};
use crate::infrastructure::api::{FetchError, OrderSource};

pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        // Zero means no timeout
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn orders_url(&self) -> String {
        format!("{}/orders", self.base_url)
    }
}

#[async_trait::async_trait]
impl OrderSource for HttpSource {
    async fn fetch_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, FetchError> {
        let mut request = self.http.get(self.orders_url());
        if filter != StatusFilter::All {
            request = request.query(&[("status", filter.as_query())]);
        }
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let orders: Vec<Order> = serde_json::from_slice(&body)?;
        debug!(count = orders.len(), filter = filter.as_query(), "fetched orders over http");
        Ok(orders)
    }

    fn endpoint_name(&self) -> String {
        self.base_url.clone()
    }
}

/// Add a scheme when missing and drop trailing slashes
pub fn normalize_base_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("localhost:3000"), "http://localhost:3000");
        assert_eq!(normalize_base_url("https://api.delliv.app/"), "https://api.delliv.app");
        assert_eq!(normalize_base_url(" http://x//"), "http://x");
    }

    #[test]
    fn test_orders_url() {
        let source = HttpSource::new("localhost:3000/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(source.orders_url(), "http://localhost:3000/orders");
        assert_eq!(source.endpoint_name(), "http://localhost:3000");
    }
}
