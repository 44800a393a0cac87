//! In-memory accumulation of postings between flushes.

use ahash::AHashMap;

use crate::index::postings::{DocId, PostingsMap, TokenId};

/// Buffered partial postings for one token.
#[derive(Debug, Clone)]
pub struct BufferEntry {
    /// The token these postings belong to.
    pub token_id: TokenId,

    /// Postings accumulated since the last flush. Position lists are in
    /// append order; sorting and deduplication happen in the merge at flush
    /// time, not per append.
    pub postings: PostingsMap,
}

/// Accumulates postings per token across documents since the last flush.
///
/// The buffer holds at most one entry per token id. It is owned exclusively
/// by the index writer; a completed flush empties it unconditionally.
#[derive(Debug, Default)]
pub struct PostingsBuffer {
    entries: AHashMap<TokenId, BufferEntry>,
}

impl PostingsBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        PostingsBuffer {
            entries: AHashMap::new(),
        }
    }

    /// Append `position` to the buffered list for `(token_id, doc_id)`,
    /// creating the token's entry and the document's position list on first
    /// use.
    pub fn record(&mut self, token_id: TokenId, doc_id: DocId, position: u64) {
        let entry = self.entries.entry(token_id).or_insert_with(|| BufferEntry {
            token_id,
            postings: PostingsMap::new(),
        });
        entry.postings.entry(doc_id).or_default().push(position);
    }

    /// Number of distinct tokens currently buffered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the buffered entries without consuming them.
    pub fn entries(&self) -> impl Iterator<Item = &BufferEntry> {
        self.entries.values()
    }

    /// Take every entry out of the buffer, leaving it empty.
    ///
    /// Callers must only drain after all entries have been durably merged;
    /// draining first would lose buffered postings on a failed write.
    pub fn drain(&mut self) -> Vec<BufferEntry> {
        self.entries.drain().map(|(_, entry)| entry).collect()
    }
}
