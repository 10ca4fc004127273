//! Core types for the fleetproc worker lifecycle toolkit.
//!
//! This crate provides the foundational types shared by every fleetproc
//! worker process:
//!
//! - **Lifecycle states**: the `ProcessState` machine and its transition rules
//! - **Identity**: strongly-typed fleet member and host identifiers
//! - **Heartbeats**: the message a worker publishes to the fleet monitor
//! - **Error types**: common error definitions shared across crates
//!
//! # Example
//!
//! ```
//! use fleetproc_core::{Heartbeat, HeartbeatKind, ProcessIdentity, ProcessState};
//!
//! let identity = ProcessIdentity::new("d1", "h1");
//! assert!(fleetproc_core::state::is_valid_transition(
//!     ProcessState::Created,
//!     ProcessState::ReadyToStart,
//! ));
//!
//! let hb = Heartbeat::new(&identity, ProcessState::Created, HeartbeatKind::Periodic);
//! assert_eq!(hb.state, ProcessState::Created);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod heartbeat;
pub mod ids;
pub mod state;

pub use error::{CoreError, Result};
pub use heartbeat::{Heartbeat, HeartbeatKind};
pub use ids::{HostId, MemberId, ProcessIdentity};
pub use state::ProcessState;
