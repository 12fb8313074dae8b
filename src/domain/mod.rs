//! Domain models
//!
//! Orders, their lifecycle status and the pure presentation mappings
//! (status label, status color, date formatting) derived from them.

mod order;

pub use order::{
    format_date, format_date_in, translate_status, Deliverer, InvalidTimestamp, Order, OrderStatus,
    StatusColor, StatusFilter,
};
