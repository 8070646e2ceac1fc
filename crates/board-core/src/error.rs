//! Error types for board-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
