//! Orders page
//!
//! - `controller`: filter and selection state, fetch intents, key handling
//! - `row`: per-order display fields
//! - `view`: header, filter selector and the four mutually exclusive bodies

mod controller;
mod row;
mod view;

pub use controller::{FetchIntent, ListDisplay, OrderListController};
pub use row::{OrderRow, DELIVERER_PLACEHOLDER};
pub use view::{render, EMPTY_MESSAGE, LOADING_MESSAGE, TITLE};
