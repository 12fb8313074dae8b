//! Async worker - runs in Tokio runtime and serves order fetches

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::interval;
use tracing::{debug, info};

use crate::infrastructure::api::OrderSource;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop
///
/// Every fetch runs in its own task, so a slow response never holds up a
/// newer one. Responses may therefore arrive out of order; ordering is
/// resolved by request id on the UI side.
pub async fn run_async_worker(
    source: Arc<dyn OrderSource>,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let endpoint = source.endpoint_name();
    info!(%endpoint, "order worker started");
    let _ = evt_tx.send(RuntimeEvent::Ready { endpoint });

    let mut poll_interval = interval(Duration::from_millis(20));

    loop {
        // Process commands (non-blocking)
        loop {
            match cmd_rx.try_recv() {
                Ok(RuntimeCommand::Shutdown) | Err(TryRecvError::Disconnected) => {
                    info!("order worker stopping");
                    return Ok(());
                }
                Ok(RuntimeCommand::FetchOrders { request_id, filter }) => {
                    debug!(request_id, filter = filter.as_query(), "fetching orders");
                    let source = Arc::clone(&source);
                    let evt_tx = evt_tx.clone();
                    tokio::spawn(async move {
                        let event = match source.fetch_orders(filter).await {
                            Ok(orders) => RuntimeEvent::OrdersLoaded {
                                request_id,
                                filter,
                                orders,
                            },
                            Err(err) => RuntimeEvent::OrdersFailed {
                                request_id,
                                filter,
                                message: err.to_string(),
                            },
                        };
                        let _ = evt_tx.send(event);
                    });
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        poll_interval.tick().await;
    }
}
