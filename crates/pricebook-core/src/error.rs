//! Error types for pricebook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur across the pricebook crates
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell reference format
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// Invalid column letters
    #[error("Invalid column letters: {0}")]
    InvalidColumn(String),

    /// Document could not be opened or is already held exclusively
    #[error("Document access failed: {0}")]
    DocumentAccess(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// An underlying document backend operation failed
    #[error("Backend operation failed: {0}")]
    Backend(String),

    /// Margin input could not be parsed or is out of range
    #[error("Invalid margin '{input}': {reason}")]
    InvalidMargin { input: String, reason: String },

    /// Rate derivation rejected its inputs
    #[error("Rate domain error: {0}")]
    RateDomain(String),

    /// A supplied field value failed its definition's validation
    #[error("Invalid value for field '{field}': {reason}")]
    FieldValidation { field: String, reason: String },
}
