//! In-memory store implementation for testing and throwaway indexes.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{Result, SakuinError};
use crate::index::postings::{DocId, TokenId};
use crate::store::Store;

#[derive(Debug)]
struct DocumentTable {
    rows: HashMap<DocId, DocumentRow>,
    by_title: HashMap<String, DocId>,
    next_id: DocId,
}

#[derive(Debug, Clone)]
struct DocumentRow {
    title: String,
    #[allow(dead_code)]
    body: String,
}

#[derive(Debug)]
struct TokenTable {
    rows: HashMap<TokenId, TokenRow>,
    by_text: HashMap<String, TokenId>,
    next_id: TokenId,
}

#[derive(Debug, Clone)]
struct TokenRow {
    text: String,
    doc_frequency: u64,
    postings: Vec<u8>,
}

/// An in-memory store.
///
/// Mirrors the invariants of the durable backends: unique titles and token
/// texts, ids assigned from 1 upward and never reused.
#[derive(Debug)]
pub struct MemoryStore {
    documents: RwLock<DocumentTable>,
    tokens: RwLock<TokenTable>,
    settings: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore {
            documents: RwLock::new(DocumentTable {
                rows: HashMap::new(),
                by_title: HashMap::new(),
                next_id: 1,
            }),
            tokens: RwLock::new(TokenTable {
                rows: HashMap::new(),
                by_text: HashMap::new(),
                next_id: 1,
            }),
            settings: RwLock::new(HashMap::new()),
        }
    }

    /// Number of interned tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.read().rows.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn document_id_by_title(&self, title: &str) -> Result<Option<DocId>> {
        Ok(self.documents.read().by_title.get(title).copied())
    }

    fn document_title(&self, id: DocId) -> Result<Option<String>> {
        Ok(self
            .documents
            .read()
            .rows
            .get(&id)
            .map(|row| row.title.clone()))
    }

    fn insert_document(&self, title: &str, body: &str) -> Result<DocId> {
        let mut documents = self.documents.write();

        if documents.by_title.contains_key(title) {
            return Err(SakuinError::storage(format!(
                "document title already exists: {title:?}"
            )));
        }

        let id = documents.next_id;
        documents.next_id += 1;
        documents.rows.insert(
            id,
            DocumentRow {
                title: title.to_string(),
                body: body.to_string(),
            },
        );
        documents.by_title.insert(title.to_string(), id);

        Ok(id)
    }

    fn update_document_body(&self, id: DocId, body: &str) -> Result<()> {
        let mut documents = self.documents.write();
        let row = documents
            .rows
            .get_mut(&id)
            .ok_or_else(|| SakuinError::storage(format!("no document with id {id}")))?;
        row.body = body.to_string();
        Ok(())
    }

    fn document_count(&self) -> Result<u64> {
        Ok(self.documents.read().rows.len() as u64)
    }

    fn token_by_text(&self, text: &str) -> Result<Option<(TokenId, u64)>> {
        let tokens = self.tokens.read();
        Ok(tokens
            .by_text
            .get(text)
            .map(|&id| (id, tokens.rows[&id].doc_frequency)))
    }

    fn insert_token_if_absent(&self, text: &str) -> Result<()> {
        let mut tokens = self.tokens.write();

        if tokens.by_text.contains_key(text) {
            return Ok(());
        }

        let id = tokens.next_id;
        tokens.next_id += 1;
        tokens.rows.insert(
            id,
            TokenRow {
                text: text.to_string(),
                doc_frequency: 0,
                postings: Vec::new(),
            },
        );
        tokens.by_text.insert(text.to_string(), id);

        Ok(())
    }

    fn token_text(&self, id: TokenId) -> Result<Option<String>> {
        Ok(self.tokens.read().rows.get(&id).map(|row| row.text.clone()))
    }

    fn postings(&self, id: TokenId) -> Result<Option<(u64, Vec<u8>)>> {
        Ok(self
            .tokens
            .read()
            .rows
            .get(&id)
            .map(|row| (row.doc_frequency, row.postings.clone())))
    }

    fn update_postings(&self, id: TokenId, doc_frequency: u64, postings: &[u8]) -> Result<()> {
        let mut tokens = self.tokens.write();
        let row = tokens
            .rows
            .get_mut(&id)
            .ok_or_else(|| SakuinError::storage(format!("no token with id {id}")))?;
        row.doc_frequency = doc_frequency;
        row.postings = postings.to_vec();
        Ok(())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self.settings.read().get(key).cloned())
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.settings
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
