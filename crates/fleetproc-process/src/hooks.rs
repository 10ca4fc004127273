//! The worker hook interface.
//!
//! A derived worker supplies its process-specific behavior as a
//! [`WorkerHooks`] implementation. The controller holds the hooks as an
//! injected capability object and invokes them at defined lifecycle
//! points; it never reaches into the worker's internal state.

use async_trait::async_trait;
use thiserror::Error;

/// A failure reported by a worker hook.
///
/// Hook failures propagate synchronously to the caller of the public
/// lifecycle entry point; the controller performs no retries and no
/// rollback.
#[derive(Debug, Error)]
pub enum HookError {
    /// Hook-specific failure described by the worker.
    #[error("{0}")]
    Message(String),

    /// Failure carried from an underlying library error.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HookError {
    /// Create a message-only hook error.
    #[must_use]
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// The four lifecycle hooks a worker must implement.
///
/// | hook       | invoked by            | purpose                                     |
/// |------------|-----------------------|---------------------------------------------|
/// | `on_setup` | `set_up()`            | read parameters, prepare internal state     |
/// | `on_start` | `start()`             | wire up connections, publishers, resources  |
/// | `on_stop`  | `stop()`              | release everything registered in `on_start` |
/// | `on_tick`  | `run()` while Running | one synchronous execution step              |
#[async_trait]
pub trait WorkerHooks: Send + Sync {
    /// Prepare worker parameters and internal state.
    async fn on_setup(&mut self) -> Result<(), HookError>;

    /// Wire up the worker's connections and resources.
    async fn on_start(&mut self) -> Result<(), HookError>;

    /// Release the resources registered in [`Self::on_start`].
    async fn on_stop(&mut self) -> Result<(), HookError>;

    /// Perform one execution step. Only invoked while the process is
    /// `Running`.
    async fn on_tick(&mut self) -> Result<(), HookError>;
}
