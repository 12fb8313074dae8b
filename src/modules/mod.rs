//! UI Modules
//!
//! Each module owns its state, handles its own keys through the
//! Module trait and renders itself.
//!
//! Modules:
//! - orders: order list with status filter, table and row modal
//! - sidebar: logo, navigation, finished-orders card, profile
//! - export: CSV/JSON export of the displayed orders

pub mod export;
pub mod orders;
pub mod sidebar;
