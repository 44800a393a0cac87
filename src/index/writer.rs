//! Document ingestion and flush orchestration.

use std::sync::Arc;

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::ngram::NgramTokenizer;
use crate::error::{Result, SakuinError};
use crate::index::buffer::PostingsBuffer;
use crate::index::postings::{DocId, PostingsMap, decode_postings, encode_postings, merge_postings};
use crate::index::registry::TokenRegistry;
use crate::store::Store;

/// Settings key under which the n-gram width of an index is pinned.
pub const TOKEN_LEN_KEY: &str = "token_len";

/// Index writer configuration.
#[derive(Debug, Clone)]
pub struct IndexWriterConfig {
    /// Width of the character n-grams.
    pub token_len: usize,

    /// Flush once the buffer holds more than this many distinct tokens.
    pub flush_threshold: usize,
}

impl Default for IndexWriterConfig {
    fn default() -> Self {
        IndexWriterConfig {
            token_len: 2,
            flush_threshold: 2048,
        }
    }
}

/// Counters describing the writing process.
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Documents ingested since the writer was created.
    pub documents_indexed: u64,

    /// Buffered token entries merged into the store.
    pub tokens_flushed: u64,

    /// Completed flushes.
    pub flushes: u64,
}

/// Builds the inverted index: upserts documents in the store, buffers
/// postings per token, and merges the buffer into the store once its
/// distinct-token count crosses the flush threshold.
///
/// The writer owns the buffer exclusively and runs single-threaded; flushes
/// happen inline within [`ingest`](IndexWriter::ingest) or through an
/// explicit [`flush`](IndexWriter::flush). Call `flush` before dropping the
/// writer so no buffered postings are lost.
pub struct IndexWriter {
    store: Arc<dyn Store>,
    registry: TokenRegistry,
    tokenizer: NgramTokenizer,
    buffer: PostingsBuffer,
    config: IndexWriterConfig,
    stats: WriterStats,
}

impl std::fmt::Debug for IndexWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWriter")
            .field("config", &self.config)
            .field("buffered_tokens", &self.buffer.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl IndexWriter {
    /// Create a writer over the given store.
    ///
    /// The n-gram width is pinned in the store's settings on first use.
    /// Opening an existing index with a different configured width is an
    /// error: postings of mixed widths are unsearchable.
    pub fn new(store: Arc<dyn Store>, config: IndexWriterConfig) -> Result<Self> {
        let tokenizer = NgramTokenizer::new(config.token_len)?;

        match store.setting(TOKEN_LEN_KEY)? {
            Some(value) => {
                let stored: usize = value.parse().map_err(|_| {
                    SakuinError::index(format!("invalid {TOKEN_LEN_KEY} setting: {value:?}"))
                })?;
                if stored != config.token_len {
                    return Err(SakuinError::index(format!(
                        "index was built with {TOKEN_LEN_KEY}={stored}, writer configured with {}",
                        config.token_len
                    )));
                }
            }
            None => store.set_setting(TOKEN_LEN_KEY, &config.token_len.to_string())?,
        }

        Ok(IndexWriter {
            registry: TokenRegistry::new(store.clone()),
            store,
            tokenizer,
            buffer: PostingsBuffer::new(),
            config,
            stats: WriterStats::default(),
        })
    }

    /// Counters for documents, flushed tokens, and completed flushes.
    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    /// Number of distinct tokens currently buffered.
    pub fn buffered_tokens(&self) -> usize {
        self.buffer.len()
    }

    /// Ingest one document: upsert it in the store, tokenize the body, and
    /// buffer a posting for every full n-gram. Flushes inline when the
    /// buffer's distinct-token count exceeds the configured threshold.
    ///
    /// Re-ingesting a known title keeps its id and replaces the body in
    /// place. Postings derived from the previous body are left as they are;
    /// they may reference positions no longer present in the current body.
    pub fn ingest(&mut self, title: &str, body: &str) -> Result<()> {
        if title.is_empty() || body.is_empty() {
            return Err(SakuinError::invalid_operation(
                "document title and body must be non-empty",
            ));
        }

        let doc_id = self.upsert_document(title, body)?;
        self.buffer_postings(doc_id, body)?;
        self.stats.documents_indexed += 1;

        if self.buffer.len() > self.config.flush_threshold {
            self.flush()?;
        }

        Ok(())
    }

    /// Merge every buffered entry into the store, then clear the buffer.
    ///
    /// Entries are written one at a time. An error aborts the flush
    /// immediately with the buffer intact: entries already written are
    /// committed in the store, and a retry re-merges everything, which is
    /// safe because merging buffered state into persisted state is
    /// idempotent. Flushing an empty buffer performs no store writes.
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        for entry in self.buffer.entries() {
            let persisted = match self.store.postings(entry.token_id)? {
                Some((_, blob)) => decode_postings(&blob)?,
                None => PostingsMap::new(),
            };

            let merged = merge_postings(&persisted, &entry.postings);
            let doc_frequency = merged.len() as u64;
            let blob = encode_postings(&merged)?;

            self.store
                .update_postings(entry.token_id, doc_frequency, &blob)?;
        }

        // Every entry is durable; only now may the buffer be emptied.
        self.stats.tokens_flushed += self.buffer.drain().len() as u64;
        self.stats.flushes += 1;

        Ok(())
    }

    fn upsert_document(&self, title: &str, body: &str) -> Result<DocId> {
        match self.store.document_id_by_title(title)? {
            Some(id) => {
                self.store.update_document_body(id, body)?;
                Ok(id)
            }
            None => self.store.insert_document(title, body),
        }
    }

    fn buffer_postings(&mut self, doc_id: DocId, body: &str) -> Result<()> {
        for token in self.tokenizer.tokenize(body)? {
            let (token_id, _) = self.registry.intern(&token.text)?;
            self.buffer.record(token_id, doc_id, token.position);
        }
        Ok(())
    }
}
