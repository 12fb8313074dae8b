//! Offline order source backed by a JSON file or a built-in demo set

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::domain::{Deliverer, Order, OrderStatus, StatusFilter};
use crate::infrastructure::api::{FetchError, OrderSource};

enum Origin {
    File(PathBuf),
    Demo(Vec<Order>),
}

pub struct FixtureSource {
    origin: Origin,
    latency: Duration,
}

impl FixtureSource {
    /// Orders are re-read from `path` on every fetch
    pub fn from_file(path: PathBuf) -> Self {
        Self {
            origin: Origin::File(path),
            latency: Duration::ZERO,
        }
    }

    pub fn demo() -> Self {
        Self::from_orders(demo_orders())
    }

    pub fn from_orders(orders: Vec<Order>) -> Self {
        Self {
            origin: Origin::Demo(orders),
            latency: Duration::ZERO,
        }
    }

    /// Delay every response, so the loading state is visible offline
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn load(&self) -> Result<Vec<Order>, FetchError> {
        match &self.origin {
            Origin::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| FetchError::Fixture {
                        path: path.clone(),
                        source,
                    })?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            Origin::Demo(orders) => Ok(orders.clone()),
        }
    }
}

#[async_trait::async_trait]
impl OrderSource for FixtureSource {
    async fn fetch_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let orders: Vec<Order> = self
            .load()
            .await?
            .into_iter()
            .filter(|order| filter.matches(&order.status))
            .collect();
        debug!(count = orders.len(), filter = filter.as_query(), "fixture orders served");
        Ok(orders)
    }

    fn endpoint_name(&self) -> String {
        match &self.origin {
            Origin::File(path) => format!("fixture {}", path.display()),
            Origin::Demo(_) => "demo".to_string(),
        }
    }
}

/// Sample data for `--demo`
pub fn demo_orders() -> Vec<Order> {
    let rows: [(u64, &str, &str, Option<&str>, &str, &str); 8] = [
        (101, "Mariana Souza", "Rua das Palmeiras, 245 - Pinheiros, São Paulo", Some("Carlos Lima"), "2024-03-05T10:00:00Z", "done"),
        (102, "João Pereira", "Av. Afonso Pena, 1500 - Centro, Belo Horizonte", None, "2024-03-06T14:32:10Z", "opened"),
        (103, "Fernanda Alves", "Rua Chile, 12 - Comércio, Salvador", Some("Rafael Costa"), "2024-03-07T09:15:00Z", "progress"),
        (104, "Lucas Martins", "Rua XV de Novembro, 800 - Centro, Curitiba", Some("Beatriz Rocha"), "2024-03-07T18:40:00Z", "canceled"),
        (105, "Patrícia Gomes", "Av. Boa Viagem, 3200 - Boa Viagem, Recife", Some("Carlos Lima"), "2024-03-08T08:05:00Z", "done"),
        (106, "Rodrigo Nunes", "Rua dos Andradas, 410 - Centro Histórico, Porto Alegre", None, "2024-03-09T11:20:00Z", "opened"),
        (107, "Camila Ribeiro", "SQN 308 Bloco C - Asa Norte, Brasília", Some("Rafael Costa"), "2024-03-10T16:00:00Z", "progress"),
        (108, "Thiago Barbosa", "Rua Senador Pompeu, 77 - Centro, Fortaleza", Some("Beatriz Rocha"), "2024-03-11T07:45:00Z", "returned"),
    ];

    rows.into_iter()
        .map(|(id, customer, address, deliverer, created_at, status)| Order {
            id,
            customer: customer.to_string(),
            address: address.to_string(),
            deliverer: deliverer.map(|name| Deliverer {
                name: name.to_string(),
            }),
            created_at: created_at.to_string(),
            status: OrderStatus::parse(status),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_source_filters_locally() {
        let source = FixtureSource::demo();
        let all = source.fetch_orders(StatusFilter::All).await.unwrap();
        assert_eq!(all.len(), demo_orders().len());

        let done = source.fetch_orders(StatusFilter::Done).await.unwrap();
        assert!(!done.is_empty());
        assert!(done.iter().all(|o| o.status == OrderStatus::Done));
    }

    #[tokio::test]
    async fn test_demo_source_keeps_server_order() {
        let source = FixtureSource::demo();
        let ids: Vec<u64> = source
            .fetch_orders(StatusFilter::Opened)
            .await
            .unwrap()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![102, 106]);
    }

    #[tokio::test]
    async fn test_file_source_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(
            &path,
            r#"[{"id":1,"customer":"Ana","address":"Rua A","created_at":"2024-01-01T00:00:00Z","status":"canceled"},
               {"id":2,"customer":"Bia","address":"Rua B","user":{"name":"Caio"},"created_at":"2024-01-02T00:00:00Z","status":"done"}]"#,
        )
        .unwrap();

        let source = FixtureSource::from_file(path);
        let orders = source.fetch_orders(StatusFilter::Done).await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].deliverer_name(), Some("Caio"));
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let source = FixtureSource::from_file(PathBuf::from("/nonexistent/delliv/orders.json"));
        let err = source.fetch_orders(StatusFilter::All).await.unwrap_err();
        assert!(matches!(err, FetchError::Fixture { .. }));
        assert!(err.to_string().contains("/nonexistent/delliv/orders.json"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = FixtureSource::from_file(path)
            .fetch_orders(StatusFilter::All)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
