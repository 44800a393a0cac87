//! Token types for n-gram analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single n-gram produced by tokenization.
///
/// # Fields
///
/// - `text` - The n-gram's text content
/// - `position` - The value recorded into postings for this token
/// - `start_offset` / `end_offset` - Character offsets in the original body
///
/// The scan cursor moves to `start_offset + 1` after producing a full n-gram,
/// and that post-advance cursor is what `position` carries, so `position` is
/// one greater than `start_offset`. Persisted indexes depend on this offset
/// convention; do not "correct" it.
///
/// # Examples
///
/// ```
/// use sakuin::analysis::token::Token;
///
/// let token = Token::new("東京", 1, 0, 2);
/// assert_eq!(token.text, "東京");
/// assert_eq!(token.position, 1);
/// assert_eq!(token.start_offset, 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token.
    pub text: String,

    /// The position recorded into postings for this token.
    pub position: u64,

    /// The character offset where this token starts in the original body.
    pub start_offset: usize,

    /// The character offset just past the end of this token.
    pub end_offset: usize,
}

impl Token {
    /// Create a new token.
    pub fn new<S: Into<String>>(
        text: S,
        position: u64,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Get the length of the token text in characters.
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
