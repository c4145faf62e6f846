//! Deployed contract address sets, one per chain side

use serde::{Deserialize, Serialize};

/// Contracts deployed on L1
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L1Contracts {
    pub l1_message_queue: String,
    pub l1_rollup: String,
    pub l1_messenger: String,
    /// Oracle on L1 holding L2 gas prices
    pub l2_gas_price_oracle: String,
}

/// Contracts deployed on L2
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct L2Contracts {
    pub l2_message_queue: String,
    pub l2_messenger: String,
    /// Oracle on L2 holding L1 gas prices
    pub l1_gas_price_oracle: String,
}
