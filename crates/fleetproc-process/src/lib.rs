//! Embeddable lifecycle controller for fleetproc worker processes.
//!
//! Every long-running worker in the fleet embeds this crate to get:
//!
//! - a uniform lifecycle state machine (`Created`, `ReadyToStart`,
//!   `Running`, `Paused`) driven by [`ProcessController`]
//! - a uniform remote control surface (start / stop / query) exposed
//!   through [`ProcessService`], transport-agnostic
//! - a background [`HeartbeatReporter`] that publishes the current state
//!   to the fleet monitor at a fixed cadence
//!
//! The worker supplies its process-specific behavior as a [`WorkerHooks`]
//! implementation; the transport for control requests and heartbeats is
//! injected as a [`HeartbeatSink`] plus whatever server the embedding
//! binary wires around the service adapter. The controller itself holds no
//! ambient or global state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use fleetproc_core::ProcessIdentity;
//! use fleetproc_process::{
//!     ChannelSink, HeartbeatReporter, ProcessController, WorkerHooks,
//! };
//! # use fleetproc_process::HookError;
//!
//! struct NullWorker;
//!
//! #[async_trait::async_trait]
//! impl WorkerHooks for NullWorker {
//!     async fn on_setup(&mut self) -> Result<(), HookError> { Ok(()) }
//!     async fn on_start(&mut self) -> Result<(), HookError> { Ok(()) }
//!     async fn on_stop(&mut self) -> Result<(), HookError> { Ok(()) }
//!     async fn on_tick(&mut self) -> Result<(), HookError> { Ok(()) }
//! }
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let (sink, _rx) = ChannelSink::new(64);
//! let sink = Arc::new(sink);
//! let controller = Arc::new(ProcessController::new(
//!     ProcessIdentity::new("d1", "h1"),
//!     NullWorker,
//!     Arc::clone(&sink),
//! ));
//! let reporter = HeartbeatReporter::spawn(
//!     controller.internals(),
//!     sink,
//!     Duration::from_secs(1),
//! );
//!
//! controller.set_up().await?;
//! controller.start().await?;
//! loop {
//!     controller.run().await?;
//!     # break;
//! }
//! # reporter.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod comms;
pub mod config;
pub mod controller;
pub mod error;
pub mod hooks;
pub mod internals;
pub mod reporter;
pub mod service;

pub use comms::{ChannelSink, HeartbeatSink, PublishError};
pub use config::ProcessConfig;
pub use controller::ProcessController;
pub use error::{ProcessError, Result};
pub use hooks::{HookError, WorkerHooks};
pub use internals::ProcessInternals;
pub use reporter::{HeartbeatReporter, ReporterHandle};
pub use service::{ProcessService, ProcessStatus};
