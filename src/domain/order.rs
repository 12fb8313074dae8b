//! Order model and derived presentation fields

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle status of an order.
///
/// Unknown wire values are kept verbatim in `Other` so a single odd
/// record never breaks a whole listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum OrderStatus {
    Opened,
    Done,
    Canceled,
    Progress,
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "opened" => OrderStatus::Opened,
            "done" => OrderStatus::Done,
            "canceled" => OrderStatus::Canceled,
            "progress" => OrderStatus::Progress,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Opened => "opened",
            OrderStatus::Done => "done",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Progress => "progress",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Display label; unknown statuses are shown as received
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Opened => "Aberto",
            OrderStatus::Done => "Finalizado",
            OrderStatus::Canceled => "Cancelado",
            OrderStatus::Progress => "Andamento",
            OrderStatus::Other(raw) => raw,
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            OrderStatus::Opened => StatusColor::Gray,
            OrderStatus::Done => StatusColor::Green,
            OrderStatus::Canceled => StatusColor::Red,
            OrderStatus::Progress => StatusColor::Blue,
            OrderStatus::Other(_) => StatusColor::Gray,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::parse(&raw)
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    /// Non-string values (null, numbers, objects) become `Other` with
    /// their JSON text.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => OrderStatus::parse(&raw),
            other => OrderStatus::Other(other.to_string()),
        })
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Translate a raw status value into its display label.
pub fn translate_status(raw: &str) -> String {
    OrderStatus::parse(raw).label().to_string()
}

/// Badge color for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Gray,
    Green,
    Red,
    Blue,
}

impl StatusColor {
    pub fn name(&self) -> &'static str {
        match self {
            StatusColor::Gray => "gray",
            StatusColor::Green => "green",
            StatusColor::Red => "red",
            StatusColor::Blue => "blue",
        }
    }

    /// Background token used by exports and themes
    pub fn token(&self) -> &'static str {
        match self {
            StatusColor::Gray => "bg-gray-100",
            StatusColor::Green => "bg-green-100",
            StatusColor::Red => "bg-red-100",
            StatusColor::Blue => "bg-blue-100",
        }
    }
}

/// Status selection for the order list. `All` travels as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Opened,
    Done,
    Canceled,
    Progress,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 5] = [
        StatusFilter::All,
        StatusFilter::Opened,
        StatusFilter::Done,
        StatusFilter::Canceled,
        StatusFilter::Progress,
    ];

    /// Parse a filter value; anything outside the allowed set means "all".
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "opened" => StatusFilter::Opened,
            "done" => StatusFilter::Done,
            "canceled" => StatusFilter::Canceled,
            "progress" => StatusFilter::Progress,
            _ => StatusFilter::All,
        }
    }

    /// Value sent to the order API ("" for all)
    pub fn as_query(&self) -> &'static str {
        match self {
            StatusFilter::All => "",
            StatusFilter::Opened => "opened",
            StatusFilter::Done => "done",
            StatusFilter::Canceled => "canceled",
            StatusFilter::Progress => "progress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Todos",
            StatusFilter::Opened => "Aberto",
            StatusFilter::Done => "Finalizado",
            StatusFilter::Canceled => "Cancelado",
            StatusFilter::Progress => "Andamento",
        }
    }

    pub fn matches(&self, status: &OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            _ => status.as_str() == self.as_query(),
        }
    }

    pub fn next(&self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let idx = self.position();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|filter| filter == self)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deliverer {
    pub name: String,
}

/// A delivery order as returned by the order API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub customer: String,
    pub address: String,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub deliverer: Option<Deliverer>,
    pub created_at: String,
    pub status: OrderStatus,
}

impl Order {
    /// Assigned deliverer, treating a blank name as unassigned
    pub fn deliverer_name(&self) -> Option<&str> {
        self.deliverer
            .as_ref()
            .map(|d| d.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {0:?}")]
pub struct InvalidTimestamp(pub String);

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Format a timestamp as `DD/MM/YYYY` in the local calendar.
pub fn format_date(input: &str) -> Result<String, InvalidTimestamp> {
    format_date_in(input, &Local)
}

/// Format a timestamp as `DD/MM/YYYY` using the calendar of `tz`.
///
/// Offsets in the input are honored; naive date-times are taken as
/// wall-clock time in `tz`; bare dates are midnight UTC.
pub fn format_date_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<String, InvalidTimestamp> {
    let instant = parse_timestamp(input, tz)?;
    Ok(format!(
        "{:02}/{:02}/{}",
        instant.day(),
        instant.month(),
        instant.year()
    ))
}

fn parse_timestamp<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Tz>, InvalidTimestamp> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(tz));
    }

    // `Z` spelled as an offset so the formats below cover it
    let zoned = match trimmed.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+0000"),
        None => trimmed.to_string(),
    };
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Ok(dt.with_timezone(tz));
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
                return Ok(dt);
            }
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight).with_timezone(tz));
        }
    }

    Err(InvalidTimestamp(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_translate_known_statuses() {
        assert_eq!(translate_status("opened"), "Aberto");
        assert_eq!(translate_status("done"), "Finalizado");
        assert_eq!(translate_status("canceled"), "Cancelado");
        assert_eq!(translate_status("progress"), "Andamento");
    }

    #[test]
    fn test_translate_unknown_status_passes_through() {
        assert_eq!(translate_status("returned"), "returned");
        assert_eq!(translate_status(""), "");
        assert_eq!(translate_status("DONE"), "DONE");
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(OrderStatus::Opened.color(), StatusColor::Gray);
        assert_eq!(OrderStatus::Done.color(), StatusColor::Green);
        assert_eq!(OrderStatus::Canceled.color(), StatusColor::Red);
        assert_eq!(OrderStatus::Progress.color(), StatusColor::Blue);
        assert_eq!(OrderStatus::parse("lost").color(), StatusColor::Gray);
        assert_eq!(OrderStatus::Done.color().token(), "bg-green-100");
        assert_eq!(OrderStatus::parse("lost").color().token(), "bg-gray-100");
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let json = r#"{"id":7,"customer":"Ana","address":"Rua A","created_at":"2024-03-05T10:00:00Z","status":"returned"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Other("returned".to_string()));
        assert_eq!(order.status.label(), "returned");
        assert!(order.deliverer_name().is_none());
    }

    #[test]
    fn test_non_string_status_keeps_listing() {
        let json = r#"[
            {"id":1,"customer":"Ana","address":"Rua A","created_at":"2024-03-05","status":"done"},
            {"id":2,"customer":"Bia","address":"Rua B","created_at":"2024-03-05","status":null},
            {"id":3,"customer":"Caio","address":"Rua C","created_at":"2024-03-05","status":4}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].status, OrderStatus::Done);
        assert_eq!(orders[1].status, OrderStatus::Other("null".to_string()));
        assert_eq!(orders[1].status.color(), StatusColor::Gray);
        assert_eq!(orders[2].status.label(), "4");
    }

    #[test]
    fn test_deliverer_from_user_field() {
        let json = r#"{"id":1,"customer":"Ana","address":"Rua A","user":{"name":"Carlos"},"created_at":"2024-03-05","status":"done"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.deliverer_name(), Some("Carlos"));

        let blank = Order {
            deliverer: Some(Deliverer {
                name: "  ".to_string(),
            }),
            ..order
        };
        assert!(blank.deliverer_name().is_none());
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(format_date_in("2024-03-05T10:00:00Z", &Utc).unwrap(), "05/03/2024");
        assert_eq!(format_date_in("2023-12-31T23:59:59.123Z", &Utc).unwrap(), "31/12/2023");
        assert_eq!(format_date_in("2024-11-20", &Utc).unwrap(), "20/11/2024");
        assert_eq!(format_date_in("2024-03-05T10:00Z", &Utc).unwrap(), "05/03/2024");
        assert_eq!(format_date_in("2024-03-05T10:00:00+0000", &Utc).unwrap(), "05/03/2024");
        assert_eq!(format_date_in("2024-03-05T10:00:00.000Z", &Utc).unwrap(), "05/03/2024");
        assert_eq!(format_date_in("2024-03-05T10:00+00:00", &Utc).unwrap(), "05/03/2024");
        assert_eq!(format_date_in("2024-03-05 23:30:00-0300", &Utc).unwrap(), "06/03/2024");
    }

    #[test]
    fn test_format_date_shifts_to_target_calendar() {
        let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(
            format_date_in("2024-03-05T01:00:00Z", &sao_paulo).unwrap(),
            "04/03/2024"
        );
        // Naive input is already wall-clock time in the target zone
        assert_eq!(
            format_date_in("2024-03-05T01:00:00", &sao_paulo).unwrap(),
            "05/03/2024"
        );
    }

    #[test]
    fn test_format_date_year_not_padded() {
        assert_eq!(format_date_in("0999-01-02T00:00:00Z", &Utc).unwrap(), "02/01/999");
    }

    #[test]
    fn test_format_date_rejects_garbage() {
        assert_eq!(
            format_date_in("yesterday", &Utc),
            Err(InvalidTimestamp("yesterday".to_string()))
        );
        assert!(format_date_in("", &Utc).is_err());
    }

    #[test]
    fn test_filter_parse_falls_back_to_all() {
        assert_eq!(StatusFilter::parse("done"), StatusFilter::Done);
        assert_eq!(StatusFilter::parse(""), StatusFilter::All);
        assert_eq!(StatusFilter::parse("archived"), StatusFilter::All);
        assert_eq!(StatusFilter::All.as_query(), "");
        assert_eq!(StatusFilter::Progress.as_query(), "progress");
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(StatusFilter::All.next(), StatusFilter::Opened);
        assert_eq!(StatusFilter::Progress.next(), StatusFilter::All);
        assert_eq!(StatusFilter::All.prev(), StatusFilter::Progress);
    }

    #[test]
    fn test_filter_matches() {
        assert!(StatusFilter::All.matches(&OrderStatus::parse("weird")));
        assert!(StatusFilter::Done.matches(&OrderStatus::Done));
        assert!(!StatusFilter::Done.matches(&OrderStatus::Opened));
        assert!(!StatusFilter::Opened.matches(&OrderStatus::parse("weird")));
    }
}
