//! Order store - loading/error/orders state fed by the async worker
//!
//! The store is the only owner of fetched order data. UI code reads an
//! [`OrderSnapshot`] and requests mutations through [`OrderStore::dispatch`];
//! worker responses come back through [`OrderStore::resolve`] and
//! [`OrderStore::reject`]. Each dispatch gets a monotonic request id, and
//! only the response for the latest id is applied.

use tracing::{debug, warn};

use crate::domain::{Order, StatusFilter};

/// Monotonic tag for a fetch request
pub type RequestId = u64;

/// Read-only view of the order data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub orders: Vec<Order>,
}

impl Default for OrderSnapshot {
    /// Nothing has been fetched yet, so the first frame shows the loading indicator.
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            orders: Vec::new(),
        }
    }
}

/// A fetch ready to be handed to the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub filter: StatusFilter,
}

#[derive(Debug, Default)]
pub struct OrderStore {
    snapshot: OrderSnapshot,
    next_id: RequestId,
    latest: Option<FetchRequest>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &OrderSnapshot {
        &self.snapshot
    }

    /// The most recently dispatched request, if any
    pub fn latest_request(&self) -> Option<FetchRequest> {
        self.latest
    }

    /// Register a fetch for `filter` and enter the loading state.
    pub fn dispatch(&mut self, filter: StatusFilter) -> FetchRequest {
        self.next_id += 1;
        let request = FetchRequest {
            id: self.next_id,
            filter,
        };
        self.latest = Some(request);
        self.snapshot.loading = true;
        self.snapshot.error = None;
        debug!(request_id = request.id, filter = filter.as_query(), "order fetch dispatched");
        request
    }

    /// Apply a successful response. Returns false when the response is stale.
    pub fn resolve(&mut self, id: RequestId, orders: Vec<Order>) -> bool {
        if !self.is_latest(id) {
            debug!(request_id = id, "dropping stale order response");
            return false;
        }
        debug!(request_id = id, count = orders.len(), "orders loaded");
        self.snapshot.loading = false;
        self.snapshot.error = None;
        self.snapshot.orders = orders;
        true
    }

    /// Apply a failed response. Orders from the last success stay in place.
    pub fn reject(&mut self, id: RequestId, message: String) -> bool {
        if !self.is_latest(id) {
            debug!(request_id = id, "dropping stale order failure");
            return false;
        }
        warn!(request_id = id, error = %message, "order fetch failed");
        self.snapshot.loading = false;
        self.snapshot.error = Some(message);
        true
    }

    fn is_latest(&self, id: RequestId) -> bool {
        self.latest.map(|req| req.id == id).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;

    fn order(id: u64, status: OrderStatus) -> Order {
        Order {
            id,
            customer: format!("Cliente {id}"),
            address: "Rua das Flores, 10".to_string(),
            deliverer: None,
            created_at: "2024-03-05T10:00:00Z".to_string(),
            status,
        }
    }

    #[test]
    fn test_starts_loading() {
        let store = OrderStore::new();
        assert!(store.snapshot().loading);
        assert!(store.snapshot().error.is_none());
        assert!(store.latest_request().is_none());
    }

    #[test]
    fn test_request_ids_are_monotonic() {
        let mut store = OrderStore::new();
        let a = store.dispatch(StatusFilter::All);
        let b = store.dispatch(StatusFilter::Done);
        assert!(b.id > a.id);
        assert_eq!(store.latest_request(), Some(b));
    }

    #[test]
    fn test_resolve_replaces_orders() {
        let mut store = OrderStore::new();
        let req = store.dispatch(StatusFilter::All);
        assert!(store.resolve(req.id, vec![order(1, OrderStatus::Done)]));
        let snap = store.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.orders.len(), 1);

        let req = store.dispatch(StatusFilter::Opened);
        assert!(store.resolve(req.id, vec![order(2, OrderStatus::Opened), order(3, OrderStatus::Opened)]));
        let ids: Vec<u64> = store.snapshot().orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_reject_keeps_stale_orders() {
        let mut store = OrderStore::new();
        let req = store.dispatch(StatusFilter::All);
        store.resolve(req.id, vec![order(1, OrderStatus::Done)]);

        let req = store.dispatch(StatusFilter::Done);
        assert!(store.reject(req.id, "network down".to_string()));
        let snap = store.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.error.as_deref(), Some("network down"));
        assert_eq!(snap.orders.len(), 1);
    }

    #[test]
    fn test_dispatch_clears_previous_error() {
        let mut store = OrderStore::new();
        let req = store.dispatch(StatusFilter::All);
        store.reject(req.id, "boom".to_string());
        store.dispatch(StatusFilter::All);
        assert!(store.snapshot().loading);
        assert!(store.snapshot().error.is_none());
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut store = OrderStore::new();
        let first = store.dispatch(StatusFilter::All);
        let second = store.dispatch(StatusFilter::Done);

        // Newer request resolves first, then the old one arrives late
        assert!(store.resolve(second.id, vec![order(2, OrderStatus::Done)]));
        assert!(!store.resolve(first.id, vec![order(1, OrderStatus::Opened)]));
        assert!(!store.reject(first.id, "late failure".to_string()));

        let snap = store.snapshot();
        assert_eq!(snap.orders[0].id, 2);
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_stale_response_keeps_loading_until_latest_arrives() {
        let mut store = OrderStore::new();
        let first = store.dispatch(StatusFilter::All);
        let second = store.dispatch(StatusFilter::Canceled);

        assert!(!store.resolve(first.id, vec![order(1, OrderStatus::Opened)]));
        assert!(store.snapshot().loading);

        assert!(store.resolve(second.id, Vec::new()));
        assert!(!store.snapshot().loading);
        assert!(store.snapshot().orders.is_empty());
    }

    #[test]
    fn test_unknown_request_id_is_ignored() {
        let mut store = OrderStore::new();
        assert!(!store.resolve(42, vec![order(1, OrderStatus::Done)]));
        assert!(store.snapshot().orders.is_empty());
    }
}
