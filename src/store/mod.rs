//! Durable storage for documents, tokens, postings, and settings.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::index::postings::{DocId, TokenId};

/// Operations the indexing pipeline needs from a backing store.
///
/// Lookups that find nothing return `Ok(None)`; only store failures are
/// errors. Ids are store-assigned, greater than zero, and never reused or
/// renumbered. Document titles, token texts, and settings keys are unique.
///
/// Implementations synchronize internally so one instance can be shared
/// behind `Arc<dyn Store>`; the indexing pipeline itself is single-threaded.
pub trait Store: Send + Sync + std::fmt::Debug {
    // --- documents ---

    /// Look up a document id by its unique title.
    fn document_id_by_title(&self, title: &str) -> Result<Option<DocId>>;

    /// Look up a document title by id.
    fn document_title(&self, id: DocId) -> Result<Option<String>>;

    /// Insert a new document and return its assigned id. Fails if the title
    /// already exists.
    fn insert_document(&self, title: &str, body: &str) -> Result<DocId>;

    /// Replace the body of an existing document, keeping its id.
    fn update_document_body(&self, id: DocId, body: &str) -> Result<()>;

    /// Number of stored documents.
    fn document_count(&self) -> Result<u64>;

    // --- tokens ---

    /// Look up a token's id and persisted document frequency by text.
    fn token_by_text(&self, text: &str) -> Result<Option<(TokenId, u64)>>;

    /// Insert a token with zero document frequency and empty postings,
    /// unless the text is already present.
    fn insert_token_if_absent(&self, text: &str) -> Result<()>;

    /// Look up a token text by id.
    fn token_text(&self, id: TokenId) -> Result<Option<String>>;

    /// Fetch a token's document frequency and serialized postings.
    fn postings(&self, id: TokenId) -> Result<Option<(u64, Vec<u8>)>>;

    /// Replace a token's document frequency and serialized postings.
    fn update_postings(&self, id: TokenId, doc_frequency: u64, postings: &[u8]) -> Result<()>;

    // --- settings ---

    /// Read an auxiliary setting.
    fn setting(&self, key: &str) -> Result<Option<String>>;

    /// Write an auxiliary setting, replacing any previous value.
    fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}
