//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Order sources (REST API, JSON fixtures)
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod runtime;

pub use api::{create_source, OrderSource, SourceConfig};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
