//! Error types for the lifecycle controller.

use thiserror::Error;

use fleetproc_core::CoreError;

use crate::comms::PublishError;
use crate::hooks::HookError;

/// A result type using `ProcessError`.
pub type Result<T> = std::result::Result<T, ProcessError>;

/// Errors that can occur in lifecycle controller operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The requested state transition is not allowed from the current state.
    #[error(transparent)]
    InvalidTransition(#[from] CoreError),

    /// A worker hook failed; the failure is propagated, not retried.
    #[error("worker hook failed: {0}")]
    Hook(#[from] HookError),

    /// The state-change heartbeat could not be published.
    #[error("heartbeat publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl ProcessError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition(_) => 409,
            Self::Hook(_) | Self::Publish(_) => 500,
        }
    }
}
