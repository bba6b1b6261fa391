//! Error types for style ingestion.

use thiserror::Error;

/// Errors that abort a strict style parse.
#[derive(Error, Debug)]
pub enum StyleError {
    /// A numeric property value had no parsable digits.
    #[error("invalid number {value:?} for `{property}` in `{selector}`")]
    InvalidNumber {
        selector: String,
        property: String,
        value: String,
    },

    /// Style text could not be read from disk.
    #[error("failed to read stylesheet: {0}")]
    Io(#[from] std::io::Error),
}
