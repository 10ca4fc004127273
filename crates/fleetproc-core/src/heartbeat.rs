//! The heartbeat message published to the fleet monitor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::{HostId, MemberId, ProcessIdentity};
use crate::state::ProcessState;

/// Why a heartbeat was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartbeatKind {
    /// Emitted on the reporter's fixed cadence.
    Periodic,
    /// Emitted synchronously by a state transition.
    StateChange,
}

/// A worker process heartbeat.
///
/// Published both periodically and on every state change; the monitor
/// treats the absence of heartbeats as its only failure signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heartbeat {
    /// The fleet member the process belongs to.
    pub member_id: MemberId,
    /// The host the process is executing on.
    pub host_id: HostId,
    /// The process instance that emitted this heartbeat.
    pub instance_id: Uuid,
    /// Lifecycle state at emission time.
    pub state: ProcessState,
    /// Whether this beat is periodic or edge-triggered.
    pub kind: HeartbeatKind,
    /// Emission timestamp.
    pub sent_at: DateTime<Utc>,
}

impl Heartbeat {
    /// Compose a heartbeat for the given identity and state, stamped now.
    #[must_use]
    pub fn new(identity: &ProcessIdentity, state: ProcessState, kind: HeartbeatKind) -> Self {
        Self {
            member_id: identity.member_id.clone(),
            host_id: identity.host_id.clone(),
            instance_id: identity.instance_id,
            state,
            kind,
            sent_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heartbeat_carries_identity_and_state() {
        let identity = ProcessIdentity::new("d1", "h1");
        let hb = Heartbeat::new(&identity, ProcessState::Running, HeartbeatKind::StateChange);

        assert_eq!(hb.member_id, identity.member_id);
        assert_eq!(hb.host_id, identity.host_id);
        assert_eq!(hb.instance_id, identity.instance_id);
        assert_eq!(hb.state, ProcessState::Running);
        assert_eq!(hb.kind, HeartbeatKind::StateChange);
    }

    #[test]
    fn wire_format_fields() {
        let identity = ProcessIdentity::new("d1", "h1");
        let hb = Heartbeat::new(&identity, ProcessState::ReadyToStart, HeartbeatKind::Periodic);

        let json: serde_json::Value = serde_json::to_value(&hb).unwrap();
        assert_eq!(json["member_id"], "d1");
        assert_eq!(json["host_id"], "h1");
        assert_eq!(json["state"], "ready_to_start");
        assert_eq!(json["kind"], "periodic");
        assert!(json["sent_at"].is_string());
    }
}
