//! Client-side state holders

mod orders;

pub use orders::{FetchRequest, OrderSnapshot, OrderStore, RequestId};
