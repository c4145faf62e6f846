//! Test-environment orchestrator for the bridge workers
//!
//! Rewrites a baseline bridge config against ephemeral test infrastructure,
//! then launches the bridge worker roles against it, waits for each to
//! report readiness and tears everything down again.

pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod settings;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{rewrite, BlockNumber, BridgeConfig, ConfigMutator, L1Contracts, L2Contracts, RoleState};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::BridgeOrchestrator;
pub use services::{InfraDescriptor, ManagedProcess};
pub use settings::{OrchestratorSettings, OrchestratorSettingsBuilder};
pub use shared::RoleName;
pub use traits::{Infrastructure, MockInfrastructure};
