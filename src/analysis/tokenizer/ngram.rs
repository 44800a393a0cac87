//! Character n-gram tokenizer with ignored-character skipping.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{Result, SakuinError};

/// Check whether a character is excluded from token formation.
///
/// The ignored class covers whitespace, ASCII punctuation, common CJK
/// punctuation, and every ASCII letter and digit. Latin and numeric runs
/// therefore never form tokens; only the remaining characters (CJK ideographs
/// and similar scripts) are n-grammed.
pub fn is_ignored_char(c: char) -> bool {
    match c {
        ' ' | '\x0c' | '\n' | '\r' | '\t' => true,
        _ if c.is_ascii_alphanumeric() || c.is_ascii_punctuation() => true,
        '、' | '。' | '（' | '）' | '！' | '，' | '：' | '；' | '“' | '”' => true,
        _ => false,
    }
}

/// Advance `cursor` to the next token candidate.
///
/// Skips leading ignored characters, then consumes up to `n` non-ignored
/// characters. Returns `(len, start)`: the number of characters consumed and
/// the candidate's starting offset. `len == 0` signals end of input; `len <
/// n` marks a short trailing run the caller discards.
///
/// After a full n-gram the cursor rewinds to `start + 1`, so the next call
/// produces the overlapping gram one character later (a sliding window of
/// stride 1). A short run leaves the cursor where consumption stopped and is
/// never retried.
pub(crate) fn ngram_next(chars: &[char], cursor: &mut usize, n: usize) -> (usize, usize) {
    while *cursor < chars.len() && is_ignored_char(chars[*cursor]) {
        *cursor += 1;
    }

    let start = *cursor;
    let mut len = 0;

    while *cursor < chars.len() && len < n && !is_ignored_char(chars[*cursor]) {
        *cursor += 1;
        len += 1;
    }

    if len >= n {
        *cursor = start + 1;
    }

    (len, start)
}

/// A tokenizer that generates fixed-width character n-grams.
///
/// Indexing languages without word boundaries (Chinese, Japanese, Korean)
/// cannot rely on whitespace tokenization; fixed character windows make every
/// substring of width `n` findable instead.
///
/// The `position` carried by each token is the scan cursor after the window
/// slid forward, i.e. `start_offset + 1`. That value, not the start offset,
/// is what gets recorded into postings.
///
/// # Examples
///
/// ```
/// use sakuin::analysis::tokenizer::Tokenizer;
/// use sakuin::analysis::tokenizer::ngram::NgramTokenizer;
///
/// let tokenizer = NgramTokenizer::bigram();
/// let tokens: Vec<_> = tokenizer.tokenize("東京都").unwrap()
///     .map(|t| t.text.to_string())
///     .collect();
/// assert_eq!(tokens, vec!["東京", "京都"]);
///
/// // ASCII runs are ignored entirely; no token spans the boundary.
/// let tokens: Vec<_> = tokenizer.tokenize("Tokyo東京").unwrap()
///     .map(|t| t.text.to_string())
///     .collect();
/// assert_eq!(tokens, vec!["東京"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// N-gram width in characters.
    n: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer of width `n`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is 0.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SakuinError::analysis(
                "n-gram width must be at least 1".to_string(),
            ));
        }
        Ok(Self { n })
    }

    /// Create a bigram tokenizer (n=2).
    pub fn bigram() -> Self {
        Self { n: 2 }
    }

    /// The configured n-gram width.
    pub fn width(&self) -> usize {
        self.n
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut cursor = 0;

        loop {
            let (len, start) = ngram_next(&chars, &mut cursor, self.n);

            if len == 0 {
                break;
            }

            // A trailing run shorter than n cannot form a full n-gram.
            if len < self.n {
                continue;
            }

            let text: String = chars[start..start + self.n].iter().collect();
            tokens.push(Token::new(text, cursor as u64, start, start + self.n));
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &NgramTokenizer, body: &str) -> Vec<String> {
        tokenizer
            .tokenize(body)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_ngram_creation() {
        assert!(NgramTokenizer::new(2).is_ok());
        assert!(NgramTokenizer::new(0).is_err());
    }

    #[test]
    fn test_sliding_window() {
        // Five consecutive non-ignored characters with n=2 yield four tokens,
        // one starting at each of the offsets 0..=3; the run of length one
        // left at offset 4 is discarded.
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("あいうえお").unwrap().collect();

        assert_eq!(tokens.len(), 4);
        let starts: Vec<usize> = tokens.iter().map(|t| t.start_offset).collect();
        assert_eq!(starts, vec![0, 1, 2, 3]);
        assert_eq!(tokens[0].text, "あい");
        assert_eq!(tokens[3].text, "えお");
    }

    #[test]
    fn test_position_is_post_advance_cursor() {
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("日本語").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        for token in &tokens {
            assert_eq!(token.position, token.start_offset as u64 + 1);
        }
    }

    #[test]
    fn test_ignored_character_skipping() {
        // ASCII letters are ignored, so only the CJK run forms a token and
        // nothing spans the boundary.
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("A北京B").unwrap().collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "北京");
        assert_eq!(tokens[0].start_offset, 1);
        assert_eq!(tokens[0].position, 2);
    }

    #[test]
    fn test_runs_split_by_ignored_characters() {
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("東京a大阪").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "東京");
        assert_eq!(tokens[1].text, "大阪");
        assert_eq!(tokens[1].start_offset, 3);
    }

    #[test]
    fn test_short_trailing_run_discarded() {
        let tokenizer = NgramTokenizer::bigram();
        assert!(texts(&tokenizer, "北").is_empty());
        // "、" splits the text into two runs of length one.
        assert!(texts(&tokenizer, "北、京").is_empty());
    }

    #[test]
    fn test_empty_and_all_ignored_bodies() {
        let tokenizer = NgramTokenizer::bigram();
        assert!(texts(&tokenizer, "").is_empty());
        assert!(texts(&tokenizer, "Hello, world! 42").is_empty());
        assert!(texts(&tokenizer, " \t\r\n、。").is_empty());
    }

    #[test]
    fn test_trigram() {
        let tokenizer = NgramTokenizer::new(3).unwrap();
        assert_eq!(texts(&tokenizer, "春夏秋冬"), vec!["春夏秋", "夏秋冬"]);
    }

    #[test]
    fn test_is_ignored_char() {
        for c in ['a', 'Z', '0', '!', '~', ' ', '\n', '、', '。', '（', '”'] {
            assert!(is_ignored_char(c), "{c:?} should be ignored");
        }
        for c in ['北', 'あ', 'ア', '語'] {
            assert!(!is_ignored_char(c), "{c:?} should not be ignored");
        }
    }

    #[test]
    fn test_tokenizer_name() {
        let tokenizer = NgramTokenizer::bigram();
        assert_eq!(tokenizer.name(), "ngram");
    }
}
