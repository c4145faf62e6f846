//! Per-role lifecycle state
//!
//! A role is `Absent` until started. `start` moves it to `Starting`, and the
//! readiness marker moves it on to `Ready`. A role whose process is gone but
//! which has not been waited out yet reads as `Exited`. Bulk wait-exit takes
//! every role back to `Absent`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleState {
    Absent,
    Starting,
    Ready,
    Exited,
}

impl RoleState {
    /// Whether a process is still expected to be running in this state
    pub fn is_live(&self) -> bool {
        matches!(self, RoleState::Starting | RoleState::Ready)
    }

    /// Apply the readiness outcome to a `Starting` role
    pub fn on_readiness(self, ready: bool) -> RoleState {
        match (self, ready) {
            (RoleState::Starting, true) => RoleState::Ready,
            (state, _) => state,
        }
    }

    /// A tracked process was observed to have terminated
    pub fn on_exit(self) -> RoleState {
        match self {
            RoleState::Absent => RoleState::Absent,
            _ => RoleState::Exited,
        }
    }
}

impl std::fmt::Display for RoleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoleState::Absent => "absent",
            RoleState::Starting => "starting",
            RoleState::Ready => "ready",
            RoleState::Exited => "exited",
        };
        f.write_str(name)
    }
}
