//! Shared error types for the bridge test harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unknown worker role: {input}")]
    UnknownRole { input: String },

    #[error("Invalid log filter: {value}")]
    InvalidLogFilter { value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
