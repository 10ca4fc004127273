//! Shared internal state for a worker process.
//!
//! `ProcessInternals` is the one piece of state shared between the control
//! path (writer) and the heartbeat reporter (reader). It is designed to be
//! held behind an `Arc` and read lock-free: the reporter must never block a
//! transition, and no torn read of the state cell is possible.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use fleetproc_core::{ProcessIdentity, ProcessState};

/// Shared lifecycle state of one worker process instance.
#[derive(Debug)]
pub struct ProcessInternals {
    /// Immutable identity, set once at construction.
    identity: ProcessIdentity,

    /// Current state, stored as its `u8` representation.
    state: AtomicU8,

    /// Whether the lifetime-first `start()` has already happened.
    ///
    /// This is the surviving form of the legacy `STARTED`/`NOT_STARTED`
    /// constants: a flag, not a lifecycle state.
    started: AtomicBool,

    /// When the last transition was applied, if any.
    last_transition_at: RwLock<Option<DateTime<Utc>>>,
}

impl ProcessInternals {
    /// Create internals for a fresh process instance in `Created`.
    #[must_use]
    pub fn new(identity: ProcessIdentity) -> Self {
        Self {
            identity,
            state: AtomicU8::new(ProcessState::Created.as_u8()),
            started: AtomicBool::new(false),
            last_transition_at: RwLock::new(None),
        }
    }

    /// The immutable identity of this process.
    #[must_use]
    pub fn identity(&self) -> &ProcessIdentity {
        &self.identity
    }

    /// Lock-free read of the current state.
    ///
    /// Never "undefined": the cell is initialized to `Created` and only
    /// ever written from a `ProcessState`, so the raw value always decodes.
    #[must_use]
    pub fn state(&self) -> ProcessState {
        ProcessState::from_u8(self.state.load(Ordering::Acquire))
            .unwrap_or(ProcessState::Created)
    }

    /// Write the state cell and stamp the transition time.
    ///
    /// Callers go through `ProcessController::set_state`, which is the
    /// single mutation point and owns validation plus emission.
    pub fn store_state(&self, state: ProcessState) {
        self.state.store(state.as_u8(), Ordering::Release);
        *self.last_transition_at.write() = Some(Utc::now());
    }

    /// Mark the lifetime-first start as done. Returns whether it had
    /// already happened.
    pub fn mark_started(&self) -> bool {
        self.started.swap(true, Ordering::SeqCst)
    }

    /// Whether the lifetime-first `start()` has happened.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// When the last transition was applied, if any.
    #[must_use]
    pub fn last_transition_at(&self) -> Option<DateTime<Utc>> {
        *self.last_transition_at.read()
    }
}
