//! Runnable fleetproc worker node.
//!
//! Wires the embeddable lifecycle controller from `fleetproc-process` to
//! concrete transports: an axum HTTP control surface for start / stop /
//! query requests, and an HTTP heartbeat publisher targeting the fleet
//! monitor. Ships a small demo worker so the binary is a complete,
//! observable fleet member.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod monitor;
pub mod routes;
pub mod worker;

pub use config::NodeConfig;
pub use error::ApiError;
pub use monitor::{HttpMonitorSink, NoopMonitorSink};
pub use routes::create_router;
pub use worker::TelemetryRelay;
