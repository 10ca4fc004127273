//! The control-surface adapter.
//!
//! `ProcessService` translates inbound control requests into controller
//! calls. Requests and responses carry no payload beyond success/failure
//! (and the boolean for the running query), so any transport can sit in
//! front of it: the HTTP surface in `fleetproc-node`, or a test driving
//! the service directly.
//!
//! Invalid requests are rejected fail-closed with an
//! `InvalidTransition` error instead of the permissive always-succeed
//! behavior of earlier fleet controllers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use fleetproc_core::ProcessState;

use crate::comms::HeartbeatSink;
use crate::controller::ProcessController;
use crate::error::Result;
use crate::hooks::WorkerHooks;

/// Point-in-time status of a worker process, for operator queries.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessStatus {
    /// The fleet member the process belongs to.
    pub member_id: String,
    /// The host the process is executing on.
    pub host_id: String,
    /// This process instance.
    pub instance_id: Uuid,
    /// Current lifecycle state.
    pub state: ProcessState,
    /// Whether the lifetime-first start has happened.
    pub started: bool,
    /// When the last transition was applied, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

/// Adapter between a control transport and the lifecycle controller.
pub struct ProcessService<H, S> {
    controller: Arc<ProcessController<H, S>>,
}

impl<H, S> ProcessService<H, S>
where
    H: WorkerHooks,
    S: HeartbeatSink,
{
    /// Create a service around a shared controller.
    #[must_use]
    pub fn new(controller: Arc<ProcessController<H, S>>) -> Self {
        Self { controller }
    }

    /// The wrapped controller.
    #[must_use]
    pub fn controller(&self) -> &Arc<ProcessController<H, S>> {
        &self.controller
    }

    /// Handle a start request: transition to `Running` and run the start
    /// hook.
    ///
    /// # Errors
    ///
    /// Rejected fail-closed when the process is not `ReadyToStart` or
    /// `Paused`; hook and publish failures propagate.
    pub async fn handle_start(&self) -> Result<ProcessState> {
        tracing::debug!(member_id = %self.controller.identity().member_id, "start request");
        self.controller.start().await
    }

    /// Handle a stop request: transition to `ReadyToStart` and run the
    /// stop hook.
    ///
    /// # Errors
    ///
    /// Rejected fail-closed when the process is not `Running` or `Paused`;
    /// hook and publish failures propagate.
    pub async fn handle_stop(&self) -> Result<ProcessState> {
        tracing::debug!(member_id = %self.controller.identity().member_id, "stop request");
        self.controller.stop().await
    }

    /// Handle a running query: true if and only if the current state is
    /// `Running`. Read-only, no side effects.
    #[must_use]
    pub fn handle_is_running(&self) -> bool {
        self.controller.state().is_running()
    }

    /// Current status snapshot for operator queries.
    #[must_use]
    pub fn status(&self) -> ProcessStatus {
        let internals = self.controller.internals();
        let identity = self.controller.identity();
        ProcessStatus {
            member_id: identity.member_id.to_string(),
            host_id: identity.host_id.to_string(),
            instance_id: identity.instance_id,
            state: internals.state(),
            started: internals.has_started(),
            since: internals.last_transition_at(),
        }
    }
}

impl<H, S> Clone for ProcessService<H, S> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comms::ChannelSink;
    use crate::error::ProcessError;
    use crate::hooks::HookError;
    use std::result::Result;

    use async_trait::async_trait;
    use fleetproc_core::{HeartbeatKind, ProcessIdentity};
    use tokio::sync::mpsc;

    struct NullWorker;

    #[async_trait]
    impl WorkerHooks for NullWorker {
        async fn on_setup(&mut self) -> Result<(), HookError> {
            Ok(())
        }
        async fn on_start(&mut self) -> Result<(), HookError> {
            Ok(())
        }
        async fn on_stop(&mut self) -> Result<(), HookError> {
            Ok(())
        }
        async fn on_tick(&mut self) -> Result<(), HookError> {
            Ok(())
        }
    }

    fn harness() -> (
        ProcessService<NullWorker, ChannelSink>,
        mpsc::Receiver<fleetproc_core::Heartbeat>,
    ) {
        let (sink, rx) = ChannelSink::new(16);
        let controller = Arc::new(ProcessController::new(
            ProcessIdentity::new("d1", "h1"),
            NullWorker,
            Arc::new(sink),
        ));
        (ProcessService::new(controller), rx)
    }

    // The scenario from the fleet contract: set up, start request, stop
    // request, one heartbeat per transition with the new state.
    #[tokio::test]
    async fn start_stop_request_scenario() {
        let (service, mut rx) = harness();

        service.controller().set_up().await.unwrap();
        let hb = rx.try_recv().unwrap();
        assert_eq!(hb.state, ProcessState::ReadyToStart);

        let state = service.handle_start().await.unwrap();
        assert_eq!(state, ProcessState::Running);
        let hb = rx.try_recv().unwrap();
        assert_eq!(hb.state, ProcessState::Running);
        assert_eq!(hb.kind, HeartbeatKind::StateChange);
        assert_eq!(hb.member_id.as_str(), "d1");
        assert_eq!(hb.host_id.as_str(), "h1");

        let state = service.handle_stop().await.unwrap();
        assert_eq!(state, ProcessState::ReadyToStart);
        let hb = rx.try_recv().unwrap();
        assert_eq!(hb.state, ProcessState::ReadyToStart);

        // Exactly one heartbeat per transition.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn is_running_iff_state_is_running() {
        let (service, _rx) = harness();

        // Created
        assert!(!service.handle_is_running());
        // ReadyToStart
        service.controller().set_up().await.unwrap();
        assert!(!service.handle_is_running());
        // Running
        service.handle_start().await.unwrap();
        assert!(service.handle_is_running());
        // Paused
        service.controller().pause().await.unwrap();
        assert!(!service.handle_is_running());
    }

    #[tokio::test]
    async fn invalid_requests_fail_closed() {
        let (service, mut rx) = harness();

        let err = service.handle_start().await.unwrap_err();
        assert!(matches!(err, ProcessError::InvalidTransition(_)));
        assert_eq!(err.http_status_code(), 409);

        let err = service.handle_stop().await.unwrap_err();
        assert!(matches!(err, ProcessError::InvalidTransition(_)));

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn status_snapshot_tracks_lifecycle() {
        let (service, _rx) = harness();

        let status = service.status();
        assert_eq!(status.member_id, "d1");
        assert_eq!(status.host_id, "h1");
        assert_eq!(status.state, ProcessState::Created);
        assert!(!status.started);
        assert!(status.since.is_none());

        service.controller().set_up().await.unwrap();
        service.handle_start().await.unwrap();

        let status = service.status();
        assert_eq!(status.state, ProcessState::Running);
        assert!(status.started);
        assert!(status.since.is_some());
    }
}
