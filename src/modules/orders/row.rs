//! Display fields derived from an order

use chrono::{Local, TimeZone};

use crate::domain::{format_date_in, Order, StatusColor};

/// Shown in the deliverer column when nobody is assigned
pub const DELIVERER_PLACEHOLDER: &str = "-";

/// One table row, ready to render or export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub id: u64,
    pub customer: String,
    pub address: String,
    pub deliverer: String,
    pub created: String,
    pub status_label: String,
    pub status_color: StatusColor,
}

impl OrderRow {
    pub fn from_order(order: &Order) -> Self {
        Self::from_order_in(order, &Local)
    }

    /// Timestamps that do not parse are shown exactly as received.
    pub fn from_order_in<Tz: TimeZone>(order: &Order, tz: &Tz) -> Self {
        Self {
            id: order.id,
            customer: order.customer.clone(),
            address: order.address.clone(),
            deliverer: order
                .deliverer_name()
                .unwrap_or(DELIVERER_PLACEHOLDER)
                .to_string(),
            created: format_date_in(&order.created_at, tz)
                .unwrap_or_else(|_| order.created_at.clone()),
            status_label: order.status.label().to_string(),
            status_color: order.status.color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Deliverer, OrderStatus};
    use chrono::Utc;

    fn order() -> Order {
        Order {
            id: 5,
            customer: "Ana Lima".to_string(),
            address: "Rua B, 20".to_string(),
            deliverer: None,
            created_at: "2024-03-05T10:00:00Z".to_string(),
            status: OrderStatus::Progress,
        }
    }

    #[test]
    fn test_row_fields() {
        let row = OrderRow::from_order_in(&order(), &Utc);
        assert_eq!(row.deliverer, "-");
        assert_eq!(row.created, "05/03/2024");
        assert_eq!(row.status_label, "Andamento");
        assert_eq!(row.status_color, StatusColor::Blue);
    }

    #[test]
    fn test_row_with_deliverer_and_odd_status() {
        let order = Order {
            deliverer: Some(Deliverer {
                name: "Bruno".to_string(),
            }),
            status: OrderStatus::parse("returned"),
            created_at: "not a date".to_string(),
            ..order()
        };
        let row = OrderRow::from_order_in(&order, &Utc);
        assert_eq!(row.deliverer, "Bruno");
        assert_eq!(row.status_label, "returned");
        assert_eq!(row.status_color, StatusColor::Gray);
        assert_eq!(row.created, "not a date");
    }
}
