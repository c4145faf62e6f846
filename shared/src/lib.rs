//! Shared types for the bridge test harness
//!
//! Role identifiers, process tagging and logging setup used by the
//! orchestrator library and its binary.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
