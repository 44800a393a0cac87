//! Document sources that feed the index writer.

pub mod jsonl;

pub use jsonl::JsonlSource;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One document drawn from a source dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Unique document title.
    pub title: String,

    /// Document body to be tokenized.
    pub body: String,
}

/// A pull-based sequence of `(title, body)` documents.
///
/// Exhaustion is signaled by `Ok(None)`, not by a sentinel document.
/// Malformed content is an error; ingestion stops rather than silently
/// skipping the bad document.
pub trait DocumentSource {
    /// Produce the next document, or `None` at end of source.
    fn next_document(&mut self) -> Result<Option<SourceDocument>>;
}
