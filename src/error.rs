//! Error types for the sakuin library.
//!
//! All fallible operations return [`Result`], and every failure is a
//! [`SakuinError`] variant. Lookups that simply find nothing are not errors;
//! they return `Ok(None)` from the operation in question.
//!
//! # Examples
//!
//! ```
//! use sakuin::error::{Result, SakuinError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SakuinError::analysis("empty token text"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for sakuin operations.
#[derive(Error, Debug)]
pub enum SakuinError {
    /// I/O errors (reading source dumps, opening database files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Storage-related errors (backing store failures, constraint violations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Index-related errors (inconsistent index state, bad configuration)
    #[error("Index error: {0}")]
    Index(String),

    /// Analysis-related errors (tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Document-source errors (malformed dump content)
    #[error("Source error: {0}")]
    Source(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// JSON serialization/deserialization errors (postings blobs, sources)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite errors from the database-backed store
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`SakuinError`].
pub type Result<T> = std::result::Result<T, SakuinError>;

impl SakuinError {
    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        SakuinError::Storage(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        SakuinError::Index(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SakuinError::Analysis(msg.into())
    }

    /// Create a new source error.
    pub fn source<S: Into<String>>(msg: S) -> Self {
        SakuinError::Source(msg.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        SakuinError::InvalidOperation(msg.into())
    }
}
