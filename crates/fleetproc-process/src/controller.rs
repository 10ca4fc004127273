//! The lifecycle controller.
//!
//! `ProcessController` owns the state variable, validates transitions
//! fail-closed, exposes the control entry points, and forwards hook
//! invocations to the worker. A single async mutex over the hooks
//! serializes every control call, so exactly one transition is in flight
//! at a time per process instance.
//!
//! Ordering contract: a transition writes the state cell and publishes its
//! state-change heartbeat *before* the start/stop hook runs, preserving the
//! original control-request order. There is no rollback: a hook failure
//! after the state write leaves the new state in place and propagates the
//! error to the caller.

use std::sync::Arc;

use tokio::sync::Mutex;

use fleetproc_core::{state, CoreError, Heartbeat, HeartbeatKind, ProcessIdentity, ProcessState};

use crate::comms::HeartbeatSink;
use crate::error::Result;
use crate::hooks::WorkerHooks;
use crate::internals::ProcessInternals;

/// Lifecycle controller for one worker process instance.
pub struct ProcessController<H, S> {
    internals: Arc<ProcessInternals>,
    hooks: Mutex<H>,
    sink: Arc<S>,
}

impl<H, S> ProcessController<H, S>
where
    H: WorkerHooks,
    S: HeartbeatSink,
{
    /// Create a controller in the `Created` state.
    ///
    /// No heartbeat is emitted at construction; the first emission happens
    /// on the first transition (or from the periodic reporter).
    #[must_use]
    pub fn new(identity: ProcessIdentity, hooks: H, sink: Arc<S>) -> Self {
        Self {
            internals: Arc::new(ProcessInternals::new(identity)),
            hooks: Mutex::new(hooks),
            sink,
        }
    }

    /// Shared internals, for wiring the heartbeat reporter.
    #[must_use]
    pub fn internals(&self) -> Arc<ProcessInternals> {
        Arc::clone(&self.internals)
    }

    /// The immutable identity of this process.
    #[must_use]
    pub fn identity(&self) -> &ProcessIdentity {
        self.internals.identity()
    }

    /// Current lifecycle state. Lock-free; returns `Created` immediately
    /// after construction.
    #[must_use]
    pub fn state(&self) -> ProcessState {
        self.internals.state()
    }

    /// Whether the lifetime-first `start()` has happened.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.internals.has_started()
    }

    /// Run the worker's set-up hook and transition to `ReadyToStart`.
    ///
    /// Only valid from `Created`; a second call is rejected. The hook runs
    /// before the transition, so a set-up failure leaves the process in
    /// `Created` with no heartbeat emitted.
    ///
    /// # Errors
    ///
    /// Invalid state, hook failure, or heartbeat publish failure.
    pub async fn set_up(&self) -> Result<ProcessState> {
        let mut hooks = self.hooks.lock().await;

        let from = self.internals.state();
        if from != ProcessState::Created {
            return Err(CoreError::InvalidTransition {
                from,
                to: ProcessState::ReadyToStart,
            }
            .into());
        }

        hooks.on_setup().await?;
        let state = self.apply_state(ProcessState::ReadyToStart).await?;
        tracing::info!(member_id = %self.identity().member_id, "process set up");
        Ok(state)
    }

    /// Transition to `Running`.
    ///
    /// From `ReadyToStart` this invokes the start hook and, on the
    /// lifetime-first start only, one tick. From `Paused` it is a resume:
    /// no start hook, no first-tick replay. The state write and its
    /// heartbeat precede the hook.
    ///
    /// # Errors
    ///
    /// Invalid state, hook failure, or heartbeat publish failure. A hook
    /// failure does not roll the state back.
    pub async fn start(&self) -> Result<ProcessState> {
        let mut hooks = self.hooks.lock().await;

        let from = self.internals.state();
        if !matches!(from, ProcessState::ReadyToStart | ProcessState::Paused) {
            return Err(CoreError::InvalidTransition {
                from,
                to: ProcessState::Running,
            }
            .into());
        }

        let state = self.apply_state(ProcessState::Running).await?;

        if from == ProcessState::ReadyToStart {
            hooks.on_start().await?;
            if !self.internals.mark_started() {
                hooks.on_tick().await?;
            }
        }

        tracing::info!(
            member_id = %self.identity().member_id,
            resumed = from == ProcessState::Paused,
            "process started"
        );
        Ok(state)
    }

    /// Transition to `ReadyToStart` and run the stop hook, releasing the
    /// worker's resources.
    ///
    /// Valid from `Running` or `Paused`.
    ///
    /// # Errors
    ///
    /// Invalid state, hook failure, or heartbeat publish failure.
    pub async fn stop(&self) -> Result<ProcessState> {
        let mut hooks = self.hooks.lock().await;

        let from = self.internals.state();
        if !matches!(from, ProcessState::Running | ProcessState::Paused) {
            return Err(CoreError::InvalidTransition {
                from,
                to: ProcessState::ReadyToStart,
            }
            .into());
        }

        let state = self.apply_state(ProcessState::ReadyToStart).await?;
        hooks.on_stop().await?;

        tracing::info!(member_id = %self.identity().member_id, "process stopped");
        Ok(state)
    }

    /// Freeze ticking without releasing resources. `Running -> Paused`,
    /// no stop hook.
    ///
    /// # Errors
    ///
    /// Invalid state or heartbeat publish failure.
    pub async fn pause(&self) -> Result<ProcessState> {
        let _hooks = self.hooks.lock().await;

        let from = self.internals.state();
        if from != ProcessState::Running {
            return Err(CoreError::InvalidTransition {
                from,
                to: ProcessState::Paused,
            }
            .into());
        }

        let state = self.apply_state(ProcessState::Paused).await?;
        tracing::info!(member_id = %self.identity().member_id, "process paused");
        Ok(state)
    }

    /// Resume ticking. `Paused -> Running`, no start hook.
    ///
    /// # Errors
    ///
    /// Invalid state or heartbeat publish failure.
    pub async fn resume(&self) -> Result<ProcessState> {
        let _hooks = self.hooks.lock().await;

        let from = self.internals.state();
        if from != ProcessState::Paused {
            return Err(CoreError::InvalidTransition {
                from,
                to: ProcessState::Running,
            }
            .into());
        }

        let state = self.apply_state(ProcessState::Running).await?;
        tracing::info!(member_id = %self.identity().member_id, "process resumed");
        Ok(state)
    }

    /// Perform one execution step if the process is `Running`.
    ///
    /// This is the synchronous entry point a worker calls repeatedly from
    /// its own processing loop. Outside `Running` it is a no-op. Returns
    /// whether a tick fired.
    ///
    /// # Errors
    ///
    /// Tick hook failure.
    pub async fn run(&self) -> Result<bool> {
        let mut hooks = self.hooks.lock().await;

        // Re-checked under the lock so a racing stop wins cleanly.
        if !self.internals.state().can_tick() {
            return Ok(false);
        }

        hooks.on_tick().await?;
        Ok(true)
    }

    /// Set the current state directly.
    ///
    /// The single public mutation point: validates the transition
    /// fail-closed, writes the state cell, and publishes one state-change
    /// heartbeat before returning. Returns the now-current state.
    ///
    /// # Errors
    ///
    /// Invalid state or heartbeat publish failure.
    pub async fn set_state(&self, new_state: ProcessState) -> Result<ProcessState> {
        let _hooks = self.hooks.lock().await;
        self.apply_state(new_state).await
    }

    /// Validate, write, and emit. Callers must hold the hooks mutex.
    async fn apply_state(&self, to: ProcessState) -> Result<ProcessState> {
        let from = self.internals.state();
        state::validate_transition(from, to)?;
        self.internals.store_state(to);

        tracing::debug!(
            member_id = %self.identity().member_id,
            from = %from,
            to = %to,
            "state transition applied"
        );

        let heartbeat = Heartbeat::new(self.identity(), to, HeartbeatKind::StateChange);
        self.sink.publish(&heartbeat).await?;
        Ok(to)
    }
}
