//! Error types for the ambient (loading and lookup) surface
//!
//! The row mapping core is total and never returns these. They are produced
//! only when reading a batch from JSON or a file, and by strict column lookups
//! on a [`ParsedRow`](crate::types::ParsedRow).

use thiserror::Error;

/// Result type alias for resultrows operations
pub type Result<T> = std::result::Result<T, RowsError>;

/// Errors raised outside the row mapping core
#[derive(Error, Debug)]
pub enum RowsError {
    /// Failed to read batch input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Batch input was not valid JSON for a result batch
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Column name is not a key of the parsed row
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}
