//! File-backed infrastructure descriptor
//!
//! The provisioner that starts the chain nodes and database writes their
//! endpoints and the deployed contract addresses to a JSON file; this is
//! the production implementation of [`Infrastructure`] that reads it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{L1Contracts, L2Contracts};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::Infrastructure;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfraDescriptor {
    /// Defaults to the load time when the provisioner omits it
    #[serde(default = "session_timestamp")]
    pub timestamp: i64,
    pub l1_endpoint: String,
    pub l2_endpoint: String,
    pub db_endpoint: String,
    pub l1_contracts: L1Contracts,
    pub l2_contracts: L2Contracts,
}

fn session_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

impl InfraDescriptor {
    pub fn from_json(content: &str) -> OrchestratorResult<Self> {
        let descriptor: Self = serde_json::from_str(content)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub async fn load(path: &Path) -> OrchestratorResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|_| OrchestratorError::FileSystemError {
                operation: "read_infra_descriptor".to_string(),
                path: path.display().to_string(),
            })?;
        Self::from_json(&content)
    }

    fn validate(&self) -> OrchestratorResult<()> {
        for (field, value) in [
            ("l1_endpoint", &self.l1_endpoint),
            ("l2_endpoint", &self.l2_endpoint),
            ("db_endpoint", &self.db_endpoint),
        ] {
            if value.trim().is_empty() {
                return Err(OrchestratorError::config(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }
}

impl Infrastructure for InfraDescriptor {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn l1_endpoint(&self) -> String {
        self.l1_endpoint.clone()
    }

    fn l2_endpoint(&self) -> String {
        self.l2_endpoint.clone()
    }

    fn db_endpoint(&self) -> String {
        self.db_endpoint.clone()
    }

    fn l1_contracts(&self) -> L1Contracts {
        self.l1_contracts.clone()
    }

    fn l2_contracts(&self) -> L2Contracts {
        self.l2_contracts.clone()
    }
}
