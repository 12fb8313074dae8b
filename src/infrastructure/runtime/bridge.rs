//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI thread never blocks on the network. It sends
//! [`RuntimeCommand`]s, and the worker answers with [`RuntimeEvent`]s
//! that are drained once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::error;

use crate::domain::{Order, StatusFilter};
use crate::infrastructure::api::{create_source, OrderSource, SourceConfig};
use crate::infrastructure::runtime::worker::run_async_worker;
use crate::store::RequestId;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch orders for a filter, tagged with the store's request id
    FetchOrders {
        request_id: RequestId,
        filter: StatusFilter,
    },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Worker is up and talking to this source
    Ready { endpoint: String },
    /// Fetch finished
    OrdersLoaded {
        request_id: RequestId,
        filter: StatusFilter,
        orders: Vec<Order>,
    },
    /// Fetch failed; `message` is shown to the user as-is
    OrdersFailed {
        request_id: RequestId,
        filter: StatusFilter,
        message: String,
    },
    /// Worker-level failure
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Create a new runtime bridge for the configured order source
    pub fn new(config: SourceConfig) -> anyhow::Result<Self> {
        let source = create_source(config)?;
        Ok(Self::spawn(Arc::from(source)))
    }

    /// Run the worker against an already built source
    pub fn spawn(source: Arc<dyn OrderSource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        // Spawn the worker thread with its own Tokio runtime
        thread::spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(err) => {
                    error!(error = %err, "failed to create tokio runtime");
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Failed to create Tokio runtime: {err}"),
                    });
                    return;
                }
            };
            rt.block_on(async {
                if let Err(err) = run_async_worker(source, cmd_rx, evt_tx.clone()).await {
                    let _ = evt_tx.send(RuntimeEvent::Error {
                        message: format!("Worker exited: {:#}", err),
                    });
                }
            });
        });

        Self { cmd_tx, evt_rx }
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
