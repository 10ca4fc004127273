//! Identity types for fleetproc worker processes.
//!
//! This module provides strongly-typed identifiers for fleet members and
//! hosts, plus the immutable identity a worker process carries for its
//! whole lifetime.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of the fleet member (e.g. a drone) a process belongs to.
///
/// Member ids are operator-assigned and opaque to fleetproc.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create a new `MemberId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for MemberId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of the host machine a process is executing on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    /// Create a new `HostId`.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for HostId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The immutable identity of a worker process.
///
/// Set once at construction and never mutated; the heartbeat reporter reads
/// it when composing messages. The `instance_id` is generated per
/// construction so the fleet monitor can distinguish restarts of the same
/// member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessIdentity {
    /// The fleet member this process belongs to.
    pub member_id: MemberId,
    /// The host the process is executing on.
    pub host_id: HostId,
    /// Unique id of this process instance.
    pub instance_id: Uuid,
}

impl ProcessIdentity {
    /// Create a new identity with a fresh instance id.
    #[must_use]
    pub fn new(member_id: impl Into<MemberId>, host_id: impl Into<HostId>) -> Self {
        Self {
            member_id: member_id.into(),
            host_id: host_id.into(),
            instance_id: Uuid::new_v4(),
        }
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<String> for HostId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ProcessIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.member_id, self.host_id)
    }
}
