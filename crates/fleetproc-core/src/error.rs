//! Common error types for fleetproc.
//!
//! This module provides shared error types that are used across multiple crates.

use crate::state::ProcessState;
use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur throughout the fleetproc system.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested state transition is not allowed by the lifecycle machine.
    #[error("invalid state transition: cannot transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The current state.
        from: ProcessState,
        /// The requested target state.
        to: ProcessState,
    },

    /// A raw state value did not correspond to any known `ProcessState`.
    #[error("unknown process state value: {0}")]
    UnknownState(u8),
}
