//! Communication capabilities consumed by the controller.
//!
//! The controller and reporter never talk to a transport directly; they
//! publish through an injected [`HeartbeatSink`]. This keeps the
//! controller free of ambient global state and independently testable with
//! in-process fakes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use fleetproc_core::Heartbeat;

/// Errors that can occur while publishing a heartbeat.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The in-process heartbeat channel has no remaining receiver.
    #[error("heartbeat channel closed")]
    ChannelClosed,

    /// The transport to the fleet monitor failed.
    #[error("monitor transport error: {0}")]
    Transport(String),
}

/// One-way, fire-and-forget publisher for heartbeat messages.
#[async_trait]
pub trait HeartbeatSink: Send + Sync {
    /// Publish a single heartbeat.
    ///
    /// # Errors
    ///
    /// Returns a `PublishError` if the message could not be handed to the
    /// transport. The periodic reporter logs and retries on the next tick;
    /// state-change emission surfaces the error to the control caller.
    async fn publish(&self, heartbeat: &Heartbeat) -> Result<(), PublishError>;
}

/// In-process sink backed by a bounded tokio channel.
///
/// Used by tests and by embeddings that forward heartbeats to their own
/// transport task.
pub struct ChannelSink {
    tx: mpsc::Sender<Heartbeat>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    #[must_use]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Heartbeat>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl HeartbeatSink for ChannelSink {
    async fn publish(&self, heartbeat: &Heartbeat) -> Result<(), PublishError> {
        self.tx
            .send(heartbeat.clone())
            .await
            .map_err(|_| PublishError::ChannelClosed)
    }
}
