//! Service implementations
//!
//! Real implementations that perform I/O: config files, worker processes
//! and the file-backed infrastructure descriptor.

pub mod file_manager;
pub mod infra_descriptor;
pub mod process_manager;
pub mod process_output_handler;

#[cfg(test)]
mod tests;

pub use infra_descriptor::InfraDescriptor;
pub use process_manager::ManagedProcess;
