//! The heartbeat reporter.
//!
//! Once spawned, the reporter publishes the controller's current state at a
//! fixed cadence for the remaining lifetime of the process, independent of
//! whether the worker is ticking. It is a pure reader: it never mutates
//! state and never blocks the controller's transition path (the state cell
//! is an atomic).
//!
//! In the fleet, the absence of these heartbeats is the monitor's only
//! failure signal; the reporter therefore treats publish failures as
//! log-and-retry, never fatal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use fleetproc_core::{Heartbeat, HeartbeatKind};

use crate::comms::HeartbeatSink;
use crate::internals::ProcessInternals;

/// Spawns the periodic heartbeat task.
pub struct HeartbeatReporter;

impl HeartbeatReporter {
    /// Start publishing `Periodic` heartbeats every `period`.
    ///
    /// The task runs until the returned handle is shut down or dropped;
    /// in production that is process exit, in tests the handle makes the
    /// reporter deterministic to stop.
    #[must_use]
    pub fn spawn<S>(
        internals: Arc<ProcessInternals>,
        sink: Arc<S>,
        period: Duration,
    ) -> ReporterHandle
    where
        S: HeartbeatSink + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let heartbeat = Heartbeat::new(
                            internals.identity(),
                            internals.state(),
                            HeartbeatKind::Periodic,
                        );
                        if let Err(err) = sink.publish(&heartbeat).await {
                            tracing::warn!(
                                member_id = %internals.identity().member_id,
                                error = %err,
                                "heartbeat publish failed, retrying next tick"
                            );
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        ReporterHandle {
            shutdown: shutdown_tx,
            task: Some(task),
        }
    }
}

/// Handle to a running heartbeat reporter task.
///
/// Dropping the handle aborts the task; [`ReporterHandle::shutdown`] stops
/// it cleanly and waits for it to finish.
pub struct ReporterHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl ReporterHandle {
    /// Stop the reporter and wait for the task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    /// Whether the reporter task has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comms::ChannelSink;
    use fleetproc_core::{ProcessIdentity, ProcessState};
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn reports_current_state_on_cadence() {
        let internals = Arc::new(ProcessInternals::new(ProcessIdentity::new("d1", "h1")));
        let (sink, mut rx) = ChannelSink::new(16);
        let handle = HeartbeatReporter::spawn(
            Arc::clone(&internals),
            Arc::new(sink),
            Duration::from_millis(10),
        );

        let first = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        assert_eq!(first.state, ProcessState::Created);
        assert_eq!(first.kind, HeartbeatKind::Periodic);

        // The reporter picks up state changes made by the control path.
        internals.store_state(ProcessState::ReadyToStart);
        internals.store_state(ProcessState::Running);
        let seen_running = async {
            loop {
                let hb = rx.recv().await.unwrap();
                if hb.state == ProcessState::Running {
                    break hb;
                }
            }
        };
        let hb = timeout(RECV_TIMEOUT, seen_running).await.unwrap();
        assert_eq!(hb.member_id.as_str(), "d1");
        assert_eq!(hb.host_id.as_str(), "h1");

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_stops_publishing() {
        let internals = Arc::new(ProcessInternals::new(ProcessIdentity::new("d1", "h1")));
        let (sink, mut rx) = ChannelSink::new(16);
        let handle =
            HeartbeatReporter::spawn(internals, Arc::new(sink), Duration::from_millis(10));

        // Let it beat at least once, then stop it.
        timeout(RECV_TIMEOUT, rx.recv()).await.unwrap().unwrap();
        handle.shutdown().await;

        // Drain whatever was in flight; after that the stream stays silent.
        while rx.try_recv().is_ok() {}
        let quiet = timeout(Duration::from_millis(100), rx.recv()).await;
        assert!(quiet.is_err(), "reporter kept publishing after shutdown");
    }

    #[tokio::test]
    async fn publish_failure_is_not_fatal() {
        let internals = Arc::new(ProcessInternals::new(ProcessIdentity::new("d1", "h1")));
        let (sink, rx) = ChannelSink::new(16);
        // No receiver: every publish fails.
        drop(rx);

        let handle =
            HeartbeatReporter::spawn(internals, Arc::new(sink), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());
        handle.shutdown().await;
    }
}
