//! End-to-end tests for the indexing pipeline over the in-memory store.

use std::sync::Arc;

use parking_lot::Mutex;

use sakuin::error::{Result, SakuinError};
use sakuin::index::postings::{DocId, PostingsMap, TokenId, decode_postings};
use sakuin::index::writer::{IndexWriter, IndexWriterConfig};
use sakuin::store::{MemoryStore, Store};

fn persisted_postings(store: &dyn Store, text: &str) -> Option<(u64, PostingsMap)> {
    let (id, freq) = store.token_by_text(text).unwrap()?;
    let (_, blob) = store.postings(id).unwrap()?;
    Some((freq, decode_postings(&blob).unwrap()))
}

#[test]
fn test_multi_document_pipeline() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let config = IndexWriterConfig {
        token_len: 2,
        flush_threshold: 2048,
    };
    let mut writer = IndexWriter::new(store.clone(), config).unwrap();

    writer.ingest("東京の記事", "東京の東京").unwrap();
    writer.ingest("大阪の記事", "大阪と東京").unwrap();
    writer.flush().unwrap();

    assert_eq!(store.document_count().unwrap(), 2);

    let doc_a = store.document_id_by_title("東京の記事").unwrap().unwrap();
    let doc_b = store.document_id_by_title("大阪の記事").unwrap().unwrap();

    // "東京" occurs twice in the first body (positions 1 and 4) and once in
    // the second (position 4, one past its start offset 3).
    let (freq, postings) = persisted_postings(store.as_ref(), "東京").unwrap();
    assert_eq!(freq, 2);
    assert_eq!(postings.get(&doc_a), Some(&vec![1, 4]));
    assert_eq!(postings.get(&doc_b), Some(&vec![4]));

    let (freq, postings) = persisted_postings(store.as_ref(), "大阪").unwrap();
    assert_eq!(freq, 1);
    assert_eq!(postings.get(&doc_b), Some(&vec![1]));

    // Position lists come out strictly ascending with no duplicates.
    for (_, positions) in postings {
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_flush_on_shutdown_preserves_buffered_postings() {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let config = IndexWriterConfig {
        token_len: 2,
        flush_threshold: 2048,
    };
    let mut writer = IndexWriter::new(store.clone(), config).unwrap();

    writer.ingest("a", "奈良").unwrap();
    assert_eq!(writer.buffered_tokens(), 1);

    // Nothing persisted yet beyond the interned row.
    let (freq, postings) = persisted_postings(store.as_ref(), "奈良").unwrap();
    assert_eq!(freq, 0);
    assert!(postings.is_empty());

    writer.flush().unwrap();
    assert_eq!(writer.buffered_tokens(), 0);

    let (freq, postings) = persisted_postings(store.as_ref(), "奈良").unwrap();
    assert_eq!(freq, 1);
    assert_eq!(postings.len(), 1);
}

/// Store wrapper that allows a limited number of postings updates before
/// failing, for exercising mid-flush failures.
#[derive(Debug)]
struct FlakyStore {
    inner: MemoryStore,
    remaining_updates: Mutex<Option<u64>>,
}

impl FlakyStore {
    fn new(allowed_updates: u64) -> Self {
        FlakyStore {
            inner: MemoryStore::new(),
            remaining_updates: Mutex::new(Some(allowed_updates)),
        }
    }

    fn disarm(&self) {
        *self.remaining_updates.lock() = None;
    }
}

impl Store for FlakyStore {
    fn document_id_by_title(&self, title: &str) -> Result<Option<DocId>> {
        self.inner.document_id_by_title(title)
    }

    fn document_title(&self, id: DocId) -> Result<Option<String>> {
        self.inner.document_title(id)
    }

    fn insert_document(&self, title: &str, body: &str) -> Result<DocId> {
        self.inner.insert_document(title, body)
    }

    fn update_document_body(&self, id: DocId, body: &str) -> Result<()> {
        self.inner.update_document_body(id, body)
    }

    fn document_count(&self) -> Result<u64> {
        self.inner.document_count()
    }

    fn token_by_text(&self, text: &str) -> Result<Option<(TokenId, u64)>> {
        self.inner.token_by_text(text)
    }

    fn insert_token_if_absent(&self, text: &str) -> Result<()> {
        self.inner.insert_token_if_absent(text)
    }

    fn token_text(&self, id: TokenId) -> Result<Option<String>> {
        self.inner.token_text(id)
    }

    fn postings(&self, id: TokenId) -> Result<Option<(u64, Vec<u8>)>> {
        self.inner.postings(id)
    }

    fn update_postings(&self, id: TokenId, doc_frequency: u64, postings: &[u8]) -> Result<()> {
        let mut remaining = self.remaining_updates.lock();
        if let Some(budget) = remaining.as_mut() {
            if *budget == 0 {
                return Err(SakuinError::storage("simulated write failure"));
            }
            *budget -= 1;
        }
        self.inner.update_postings(id, doc_frequency, postings)
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        self.inner.setting(key)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set_setting(key, value)
    }
}

#[test]
fn test_partial_flush_failure_keeps_buffer_and_retries_cleanly() {
    let flaky = Arc::new(FlakyStore::new(1));
    let store: Arc<dyn Store> = flaky.clone();
    let config = IndexWriterConfig {
        token_len: 2,
        flush_threshold: 2048,
    };
    let mut writer = IndexWriter::new(store.clone(), config).unwrap();

    writer.ingest("a", "東京").unwrap();
    writer.ingest("b", "大阪").unwrap();
    writer.ingest("c", "奈良").unwrap();
    assert_eq!(writer.buffered_tokens(), 3);

    // One entry commits, the next write fails, and the flush aborts with
    // every entry still buffered.
    assert!(writer.flush().is_err());
    assert_eq!(writer.buffered_tokens(), 3);

    let committed = ["東京", "大阪", "奈良"]
        .iter()
        .filter(|text| persisted_postings(store.as_ref(), text).unwrap().0 > 0)
        .count();
    assert_eq!(committed, 1);

    // A retry re-merges everything; the entry written twice converges to the
    // same postings instead of duplicating positions.
    flaky.disarm();
    writer.flush().unwrap();
    assert_eq!(writer.buffered_tokens(), 0);

    for text in ["東京", "大阪", "奈良"] {
        let (freq, postings) = persisted_postings(store.as_ref(), text).unwrap();
        assert_eq!(freq, 1);
        let positions: Vec<u64> = postings.into_values().next().unwrap();
        assert_eq!(positions, vec![1]);
    }
}
