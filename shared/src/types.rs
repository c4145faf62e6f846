//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::errors::SharedError;

/// Suffix carried by every worker role identifier
pub const ROLE_SUFFIX: &str = "-test";

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Bridge worker roles the harness knows how to launch
///
/// The identifier doubles as the executable name of the worker binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "event-watcher-test")]
    EventWatcher,
    #[serde(rename = "gas-oracle-test")]
    GasOracle,
    #[serde(rename = "message-relayer-test")]
    MessageRelayer,
    #[serde(rename = "rollup-relayer-test")]
    RollupRelayer,
}

impl RoleName {
    pub const ALL: [RoleName; 4] = [
        RoleName::EventWatcher,
        RoleName::GasOracle,
        RoleName::MessageRelayer,
        RoleName::RollupRelayer,
    ];

    /// Full role identifier, e.g. `gas-oracle-test`
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::EventWatcher => "event-watcher-test",
            RoleName::GasOracle => "gas-oracle-test",
            RoleName::MessageRelayer => "message-relayer-test",
            RoleName::RollupRelayer => "rollup-relayer-test",
        }
    }

    /// Identifier with the role suffix stripped, e.g. `gas-oracle`
    pub fn base_name(&self) -> &'static str {
        base_name(self.as_str())
    }

    /// Log line a worker prints once it finished initializing
    pub fn readiness_marker(&self) -> String {
        readiness_marker(self.as_str())
    }
}

/// Strip the trailing role suffix from an identifier, if present
pub fn base_name(identifier: &str) -> &str {
    identifier.strip_suffix(ROLE_SUFFIX).unwrap_or(identifier)
}

/// Readiness marker for an arbitrary role identifier
pub fn readiness_marker(identifier: &str) -> String {
    format!("Start {} successfully", base_name(identifier))
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = SharedError;

    /// Accepts the full identifier or the bare base name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RoleName::ALL
            .into_iter()
            .find(|role| role.as_str() == trimmed || role.base_name() == trimmed)
            .ok_or_else(|| SharedError::UnknownRole { input: s.to_string() })
    }
}

/// Process identifier attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// The harness driving the test session
    Harness,
    /// Output forwarded from a worker subprocess
    Role(RoleName),
}

impl ProcessId {
    /// Initialize the global process ID for the harness
    pub fn init_harness() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Harness)
    }

    /// Get the global process ID, defaulting to the harness
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Harness)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Harness => write!(f, "harness"),
            ProcessId::Role(role) => write!(f, "{role}"),
        }
    }
}
