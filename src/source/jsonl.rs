//! Line-delimited JSON document source.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SakuinError};
use crate::source::{DocumentSource, SourceDocument};

/// Reads one `{"title": ..., "body": ...}` object per line.
///
/// Blank lines are skipped. Unknown fields are allowed, so richer dump
/// formats can be fed through unchanged. A line that fails to parse aborts
/// the sequence with an error naming the line number.
pub struct JsonlSource<R> {
    reader: R,
    line: u64,
}

impl JsonlSource<BufReader<File>> {
    /// Open a JSONL dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(JsonlSource::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlSource<R> {
    /// Wrap an already-buffered reader.
    pub fn new(reader: R) -> Self {
        JsonlSource { reader, line: 0 }
    }
}

impl<R: BufRead> DocumentSource for JsonlSource<R> {
    fn next_document(&mut self) -> Result<Option<SourceDocument>> {
        let mut buf = String::new();

        loop {
            buf.clear();
            self.line += 1;

            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }

            let line = buf.trim();
            if line.is_empty() {
                continue;
            }

            return serde_json::from_str::<SourceDocument>(line)
                .map(Some)
                .map_err(|e| SakuinError::source(format!("line {}: {e}", self.line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source_from(content: &str) -> JsonlSource<Cursor<Vec<u8>>> {
        JsonlSource::new(Cursor::new(content.as_bytes().to_vec()))
    }

    #[test]
    fn test_reads_documents_in_order() {
        let mut source = source_from(concat!(
            "{\"title\": \"a\", \"body\": \"東京\"}\n",
            "{\"title\": \"b\", \"body\": \"大阪\"}\n",
        ));

        let first = source.next_document().unwrap().unwrap();
        assert_eq!(first.title, "a");
        assert_eq!(first.body, "東京");

        let second = source.next_document().unwrap().unwrap();
        assert_eq!(second.title, "b");

        assert!(source.next_document().unwrap().is_none());
        // Staying at end of source is fine.
        assert!(source.next_document().unwrap().is_none());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut source = source_from("\n\n{\"title\": \"a\", \"body\": \"東京\"}\n\n");

        assert!(source.next_document().unwrap().is_some());
        assert!(source.next_document().unwrap().is_none());
    }

    #[test]
    fn test_unknown_fields_are_allowed() {
        let mut source =
            source_from("{\"title\": \"a\", \"body\": \"東京\", \"revision\": 12}\n");

        let doc = source.next_document().unwrap().unwrap();
        assert_eq!(doc.title, "a");
    }

    #[test]
    fn test_malformed_line_is_an_error_with_line_number() {
        let mut source = source_from(concat!(
            "{\"title\": \"a\", \"body\": \"東京\"}\n",
            "not json\n",
        ));

        assert!(source.next_document().unwrap().is_some());
        let err = source.next_document().unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }
}
