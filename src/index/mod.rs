//! The indexing pipeline: postings, buffering, interning, and the writer.

pub mod buffer;
pub mod postings;
pub mod registry;
pub mod writer;

// Re-export commonly used types
pub use buffer::{BufferEntry, PostingsBuffer};
pub use postings::{DocId, PostingsMap, TokenId, decode_postings, encode_postings, merge_postings};
pub use registry::TokenRegistry;
pub use writer::{IndexWriter, IndexWriterConfig, WriterStats};
