//! Common test utilities and infrastructure
//!
//! Fixtures describe a provisioned test environment; helpers set up a
//! throwaway session directory with stand-in worker scripts.

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::TestSession;
