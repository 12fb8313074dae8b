//! Order source abstraction

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::domain::{Order, StatusFilter};
use crate::infrastructure::api::{FixtureSource, HttpSource};

/// Why a fetch failed. The worker hands `to_string()` to the UI verbatim.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Status { status: u16 },

    #[error("invalid order payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("cannot read fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where orders come from
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// REST endpoint serving `GET /orders`
    Http {
        base_url: String,
        token: Option<String>,
        timeout: Duration,
    },
    /// JSON file on disk, or the built-in demo set when `path` is None
    Fixture {
        path: Option<PathBuf>,
        latency: Duration,
    },
}

impl SourceConfig {
    pub fn display(&self) -> String {
        match self {
            SourceConfig::Http { base_url, .. } => base_url.clone(),
            SourceConfig::Fixture {
                path: Some(path), ..
            } => format!("fixture {}", path.display()),
            SourceConfig::Fixture { path: None, .. } => "demo".to_string(),
        }
    }
}

/// Abstract order source
#[async_trait::async_trait]
pub trait OrderSource: Send + Sync + 'static {
    /// Fetch orders matching `filter`, in server order
    async fn fetch_orders(&self, filter: StatusFilter) -> Result<Vec<Order>, FetchError>;

    /// Human-readable origin for the status line
    fn endpoint_name(&self) -> String;
}

/// Build a source from configuration
pub fn create_source(config: SourceConfig) -> Result<Box<dyn OrderSource>> {
    match config {
        SourceConfig::Http {
            base_url,
            token,
            timeout,
        } => {
            let source =
                HttpSource::new(&base_url, token, timeout).context("Failed to create HTTP client")?;
            Ok(Box::new(source))
        }
        SourceConfig::Fixture { path, latency } => {
            let source = match path {
                Some(path) => FixtureSource::from_file(path),
                None => FixtureSource::demo(),
            };
            Ok(Box::new(source.with_latency(latency)))
        }
    }
}
