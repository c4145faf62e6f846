//! Orchestrator-specific error types

use shared::{RoleName, SharedError};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Failed to load baseline config {path}: {reason}")]
    ConfigLoad { path: String, reason: String },

    #[error("Failed to persist config to {path}: {reason}")]
    ConfigPersist { path: String, reason: String },

    #[error("Don't support the worker role: {name}")]
    InvalidRole { name: String },

    #[error("Role {role} did not report readiness within {timeout:?}")]
    ReadinessTimeout { role: RoleName, timeout: Duration },

    #[error("Role {role} exited before reporting readiness")]
    ExitedBeforeReady { role: RoleName },

    #[error("Failed to spawn role {role}: {reason}")]
    SpawnFailed { role: RoleName, reason: String },

    #[error("Failed waiting for role {role} to exit: {reason}")]
    ProcessWait { role: RoleName, reason: String },

    #[error("File system operation failed: {operation} on {path}")]
    FileSystemError { operation: String, path: String },

    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn config(field: impl Into<String>) -> Self {
        OrchestratorError::ConfigurationError { field: field.into() }
    }

    pub fn load(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        OrchestratorError::ConfigLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persist(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        OrchestratorError::ConfigPersist {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for failures where the process was still left tracked
    pub fn is_readiness_failure(&self) -> bool {
        matches!(
            self,
            OrchestratorError::ReadinessTimeout { .. } | OrchestratorError::ExitedBeforeReady { .. }
        )
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
