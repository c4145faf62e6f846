//! Baseline config → isolated test config
//!
//! [`rewrite`] is a pure function of the baseline and the infrastructure.
//! [`ConfigMutator`] wraps it with loading from disk and optional
//! persistence of the result for the worker processes to read.

use std::path::{Path, PathBuf};

use shared::{process_debug, process_info, ProcessId};

use crate::core::bridge_config::{BlockNumber, BridgeConfig};
use crate::error::OrchestratorResult;
use crate::services::file_manager;
use crate::traits::Infrastructure;

/// Smallest commit calldata limit the batch proposer accepts; forces a
/// commit per chunk so batching edge paths run deterministically
pub const MIN_COMMIT_CALLDATA_SIZE_LIMIT: u64 = 1;

/// Bind a baseline config to the given test infrastructure
///
/// Each relayer talks to the opposite chain, so its contract addresses come
/// from the counterpart's deployed set. The sender endpoints follow the same
/// rule: a relayer's sender submits to the chain it relays into.
pub fn rewrite(baseline: &BridgeConfig, infra: &dyn Infrastructure) -> BridgeConfig {
    let mut cfg = baseline.clone();
    let (l1_contracts, l2_contracts) = (infra.l1_contracts(), infra.l2_contracts());
    let (l1_endpoint, l2_endpoint) = (infra.l1_endpoint(), infra.l2_endpoint());

    let l1 = &mut cfg.l1_config;
    let l2 = &mut cfg.l2_config;

    // No confirmation wait in tests.
    l1.confirmations = BlockNumber::ZERO;
    l1.relayer_config.sender_config.confirmations = BlockNumber::ZERO;
    l2.confirmations = BlockNumber::ZERO;
    l2.relayer_config.sender_config.confirmations = BlockNumber::ZERO;
    l2.batch_proposer_config.commit_tx_calldata_size_limit = MIN_COMMIT_CALLDATA_SIZE_LIMIT;

    l1.endpoint = l1_endpoint.clone();
    l2.relayer_config.sender_config.endpoint = l1_endpoint;
    l2.endpoint = l2_endpoint.clone();
    l1.relayer_config.sender_config.endpoint = l2_endpoint;
    cfg.db_config.dsn = infra.db_endpoint();

    l1.l1_message_queue_address = l1_contracts.l1_message_queue.clone();
    l1.rollup_contract_address = l1_contracts.l1_rollup.clone();
    l1.l1_messenger_address = l1_contracts.l1_messenger.clone();
    l1.relayer_config.messenger_contract_address = l2_contracts.l2_messenger.clone();
    l1.relayer_config.gas_price_oracle_contract_address = l2_contracts.l1_gas_price_oracle.clone();

    l2.l2_message_queue_address = l2_contracts.l2_message_queue;
    l2.l2_messenger_address = l2_contracts.l2_messenger;
    l2.relayer_config.rollup_contract_address = Some(l1_contracts.l1_rollup);
    l2.relayer_config.messenger_contract_address = l1_contracts.l1_messenger;
    l2.relayer_config.gas_price_oracle_contract_address = l1_contracts.l2_gas_price_oracle;

    cfg
}

/// Session-unique location of the persisted config
pub fn artifact_path(dir: &Path, timestamp: i64) -> PathBuf {
    dir.join(format!("{timestamp}_bridge-config.json"))
}

/// Loads, rewrites and optionally persists bridge configs
#[derive(Debug, Clone)]
pub struct ConfigMutator {
    artifact_dir: PathBuf,
}

impl ConfigMutator {
    /// Persist into the system temp directory
    pub fn new() -> Self {
        Self {
            artifact_dir: std::env::temp_dir(),
        }
    }

    /// Configure artifact directory (fluent API)
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    pub fn artifact_path(&self, infra: &dyn Infrastructure) -> PathBuf {
        artifact_path(&self.artifact_dir, infra.timestamp())
    }

    /// Load `baseline_path`, bind it to `infra` and persist when asked
    ///
    /// The rewritten config is returned whether or not it was persisted.
    pub async fn mutate(
        &self,
        baseline_path: &Path,
        infra: &dyn Infrastructure,
        persist: bool,
    ) -> OrchestratorResult<BridgeConfig> {
        let baseline = file_manager::load_config(baseline_path).await?;
        let cfg = rewrite(&baseline, infra);

        process_debug!(
            ProcessId::current(),
            "Rewrote {} for L1 {} / L2 {}",
            baseline_path.display(),
            cfg.l1_config.endpoint,
            cfg.l2_config.endpoint
        );

        if persist {
            let path = self.artifact_path(infra);
            file_manager::persist_config(&path, &cfg).await?;
            process_info!(ProcessId::current(), "📝 Stored test config at {}", path.display());
        }

        Ok(cfg)
    }
}

impl Default for ConfigMutator {
    fn default() -> Self {
        Self::new()
    }
}
