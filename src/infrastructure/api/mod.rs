//! Order API - sources the worker fetches orders from

mod fixture;
mod http;
mod source;

pub use fixture::{demo_orders, FixtureSource};
pub use http::{normalize_base_url, HttpSource};
pub use source::{create_source, FetchError, OrderSource, SourceConfig};
