//! Store-backed interning of token texts.

use std::sync::Arc;

use crate::error::{Result, SakuinError};
use crate::index::postings::TokenId;
use crate::store::Store;

/// Maps token text to its stable, store-assigned integer identity.
///
/// Interning is insert-if-absent: the first sight of a text creates the
/// token with zero document frequency and empty postings; every later call
/// returns the same id. Safe to call redundantly.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    store: Arc<dyn Store>,
}

impl TokenRegistry {
    /// Create a registry over the given store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        TokenRegistry { store }
    }

    /// Intern `text`, returning its id and currently persisted document
    /// frequency.
    pub fn intern(&self, text: &str) -> Result<(TokenId, u64)> {
        self.store.insert_token_if_absent(text)?;
        self.store
            .token_by_text(text)?
            .ok_or_else(|| SakuinError::storage(format!("token {text:?} missing after insert")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_intern_assigns_stable_ids() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let registry = TokenRegistry::new(store);

        let (id_a, freq_a) = registry.intern("東京").unwrap();
        let (id_b, _) = registry.intern("京都").unwrap();

        assert!(id_a > 0);
        assert_eq!(freq_a, 0);
        assert_ne!(id_a, id_b);
    }

    #[test]
    fn test_intern_is_idempotent() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let registry = TokenRegistry::new(store);

        let (first, _) = registry.intern("日本").unwrap();
        let (second, _) = registry.intern("日本").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_intern_reports_persisted_frequency() {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let registry = TokenRegistry::new(store.clone());

        let (id, _) = registry.intern("検索").unwrap();
        store.update_postings(id, 3, br#"{"1":[2],"2":[1],"5":[4]}"#).unwrap();

        let (same_id, freq) = registry.intern("検索").unwrap();
        assert_eq!(same_id, id);
        assert_eq!(freq, 3);
    }
}
