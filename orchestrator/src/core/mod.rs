//! Core logic: config model, rewrite and role state

pub mod bridge_config;
pub mod contracts;
pub mod mutator;
pub mod state;

pub use bridge_config::{
    BatchProposerConfig, BlockNumber, BridgeConfig, DbConfig, ExtraFields, L1Config, L2Config, RelayerConfig, SenderConfig,
};
pub use contracts::{L1Contracts, L2Contracts};
pub use mutator::{artifact_path, rewrite, ConfigMutator, MIN_COMMIT_CALLDATA_SIZE_LIMIT};
pub use state::RoleState;
