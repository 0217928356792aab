//! Error types for the lunrdex library.
//!
//! All errors are represented by the [`LunrdexError`] enum. The two errors a
//! caller of [`crate::builder::IndexBuilder::upsert`] has to handle are
//! [`LunrdexError::MalformedIndex`] and [`LunrdexError::InvalidDocument`];
//! the remaining variants come from the file wrapper and the CLI.
//!
//! # Examples
//!
//! ```
//! use lunrdex::error::{LunrdexError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LunrdexError::invalid_document("document id must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for lunrdex operations.
#[derive(Error, Debug)]
pub enum LunrdexError {
    /// The serialized index is present but cannot be decoded.
    #[error("Malformed index: {0}")]
    MalformedIndex(String),

    /// The document cannot be indexed (empty id).
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// I/O errors (reading or writing an index file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with LunrdexError.
pub type Result<T> = std::result::Result<T, LunrdexError>;

impl LunrdexError {
    /// Create a new malformed index error.
    pub fn malformed_index<S: Into<String>>(msg: S) -> Self {
        LunrdexError::MalformedIndex(msg.into())
    }

    /// Create a new invalid document error.
    pub fn invalid_document<S: Into<String>>(msg: S) -> Self {
        LunrdexError::InvalidDocument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        LunrdexError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LunrdexError::Other(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        LunrdexError::Other(format!("Not found: {}", msg.into()))
    }

    /// Whether this error means the caller's serialized index is unusable.
    pub fn is_malformed_index(&self) -> bool {
        matches!(self, LunrdexError::MalformedIndex(_))
    }

    /// Whether this error means the document was rejected.
    pub fn is_invalid_document(&self) -> bool {
        matches!(self, LunrdexError::InvalidDocument(_))
    }
}
