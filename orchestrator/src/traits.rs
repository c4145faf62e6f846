//! Trait definitions with mockall annotations for testing
//!
//! The test infrastructure (chain nodes, database, deployed contracts) is
//! provisioned outside this crate. The orchestrator only reads it through
//! this seam, which keeps the config rewrite testable without containers.

use crate::core::{L1Contracts, L2Contracts};

/// Read-only view of the ephemeral resources a test session runs against
#[mockall::automock]
pub trait Infrastructure: Send + Sync {
    /// Session timestamp; makes the persisted config path unique
    fn timestamp(&self) -> i64;

    /// RPC endpoint of the L1 chain node
    fn l1_endpoint(&self) -> String;

    /// RPC endpoint of the L2 chain node
    fn l2_endpoint(&self) -> String;

    /// Connection string of the database instance
    fn db_endpoint(&self) -> String;

    /// Contracts deployed on L1
    fn l1_contracts(&self) -> L1Contracts;

    /// Contracts deployed on L2
    fn l2_contracts(&self) -> L2Contracts;
}
