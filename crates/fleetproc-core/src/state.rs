//! Worker process lifecycle state machine.
//!
//! This module defines the valid state transitions for a worker process and
//! provides validation logic to ensure state machine invariants are
//! maintained.
//!
//! # State Machine
//!
//! ```text
//!     ┌─────────────┐
//!     │   Created   │
//!     └──────┬──────┘
//!            │ (set up)
//!            ▼
//!     ┌──────────────┐   (start)    ┌─────────────┐
//!     │ ReadyToStart │─────────────▶│   Running   │
//!     └──────────────┘              └─────────────┘
//!            ▲                        │    ▲   │
//!            │ (stop)                 │    │   │ (pause)
//!            ├────────────────────────┘    │   ▼
//!            │                       ┌─────┴───────┐
//!            │ (stop while paused)   │   Paused    │
//!            └───────────────────────┤  (resume ▲) │
//!                                    └─────────────┘
//! ```
//!
//! The `Paused` transitions are a designed extension point: pausing freezes
//! ticking without tearing resources down, resuming does not re-run the
//! start hook.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Lifecycle states for a worker process.
///
/// Exactly one state is current at any instant; there is no "undefined"
/// value once construction completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProcessState {
    /// Instance constructed, set-up hook not yet run.
    Created = 1,
    /// Set up and waiting for a start request.
    ReadyToStart = 2,
    /// Actively ticking.
    Running = 3,
    /// Ticking frozen, resources still wired.
    Paused = 4,
}

impl ProcessState {
    /// Convert the state to its numeric representation.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Try to convert a numeric value to a `ProcessState`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Created),
            2 => Some(Self::ReadyToStart),
            3 => Some(Self::Running),
            4 => Some(Self::Paused),
            _ => None,
        }
    }

    /// Stable, human-readable label for transport-facing adapters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::ReadyToStart => "ReadyToStart",
            Self::Running => "Running",
            Self::Paused => "Paused",
        }
    }

    /// Returns true if the process is actively ticking.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Returns true if the execution step may fire in this state.
    ///
    /// The tick hook is only ever invoked while `Running`.
    #[must_use]
    pub const fn can_tick(self) -> bool {
        self.is_running()
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical list of all lifecycle states.
pub const ALL_STATES: [ProcessState; 4] = [
    ProcessState::Created,
    ProcessState::ReadyToStart,
    ProcessState::Running,
    ProcessState::Paused,
];

/// Check if a state transition is valid according to the state machine.
#[must_use]
pub const fn is_valid_transition(from: ProcessState, to: ProcessState) -> bool {
    use ProcessState::{Created, Paused, ReadyToStart, Running};

    matches!(
        (from, to),
        // Created can only be set up
        (Created, ReadyToStart)
            // ReadyToStart starts; Paused resumes
            | (ReadyToStart | Paused, Running)
            // Running stops; stopping while Paused is also accepted
            | (Running | Paused, ReadyToStart)
            // Running can freeze
            | (Running, Paused)
    )
}

/// Validates a state transition and returns the target state if valid.
///
/// # Errors
///
/// Returns `CoreError::InvalidTransition` if the transition is not allowed.
pub fn validate_transition(from: ProcessState, to: ProcessState) -> Result<ProcessState> {
    if is_valid_transition(from, to) {
        Ok(to)
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

/// Returns the list of valid target states from the given state.
#[must_use]
pub fn valid_transitions_from(state: ProcessState) -> Vec<ProcessState> {
    use ProcessState::{Created, Paused, ReadyToStart, Running};

    match state {
        Created => vec![ReadyToStart],
        ReadyToStart => vec![Running],
        Running => vec![ReadyToStart, Paused],
        Paused => vec![Running, ReadyToStart],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use ProcessState::*;

        // Created -> ReadyToStart (set up)
        assert!(is_valid_transition(Created, ReadyToStart));
        // ReadyToStart -> Running (start)
        assert!(is_valid_transition(ReadyToStart, Running));
        // Running -> ReadyToStart (stop)
        assert!(is_valid_transition(Running, ReadyToStart));
        // Running -> Paused (freeze)
        assert!(is_valid_transition(Running, Paused));
        // Paused -> Running (resume)
        assert!(is_valid_transition(Paused, Running));
        // Paused -> ReadyToStart (stop while paused)
        assert!(is_valid_transition(Paused, ReadyToStart));
    }

    #[test]
    fn invalid_transitions() {
        use ProcessState::*;

        // Can't start without set-up
        assert!(!is_valid_transition(Created, Running));
        // Can't re-run set-up
        assert!(!is_valid_transition(ReadyToStart, Created));
        assert!(!is_valid_transition(Running, Created));
        // Can't pause before starting
        assert!(!is_valid_transition(ReadyToStart, Paused));
        assert!(!is_valid_transition(Created, Paused));
        // Self-transitions are not transitions
        for state in ALL_STATES {
            assert!(!is_valid_transition(state, state));
        }
    }

    #[test]
    fn validate_transition_ok() {
        let result = validate_transition(ProcessState::ReadyToStart, ProcessState::Running);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), ProcessState::Running);
    }

    #[test]
    fn validate_transition_err() {
        let result = validate_transition(ProcessState::Created, ProcessState::Running);
        assert!(result.is_err());

        match result {
            Err(CoreError::InvalidTransition { from, to }) => {
                assert_eq!(from, ProcessState::Created);
                assert_eq!(to, ProcessState::Running);
            }
            _ => panic!("expected InvalidTransition error"),
        }
    }

    #[test]
    fn valid_transitions_from_running() {
        let transitions = valid_transitions_from(ProcessState::Running);
        assert!(transitions.contains(&ProcessState::ReadyToStart));
        assert!(transitions.contains(&ProcessState::Paused));
        assert!(!transitions.contains(&ProcessState::Created));
        assert!(!transitions.contains(&ProcessState::Running));
    }

    #[test]
    fn numeric_round_trip() {
        for state in ALL_STATES {
            assert_eq!(ProcessState::from_u8(state.as_u8()), Some(state));
        }
        assert_eq!(ProcessState::from_u8(0), None);
        assert_eq!(ProcessState::from_u8(7), None);
        assert_eq!(ProcessState::from_u8(8), None);
    }

    #[test]
    fn tick_only_while_running() {
        for state in ALL_STATES {
            assert_eq!(state.can_tick(), state == ProcessState::Running);
        }
    }

    #[test]
    fn serde_labels() {
        let json = serde_json::to_string(&ProcessState::ReadyToStart).unwrap();
        assert_eq!(json, "\"ready_to_start\"");
        let state: ProcessState = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(state, ProcessState::Running);
    }
}
