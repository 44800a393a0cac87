//! Postings maps and the merge that reconciles buffered and persisted state.

use std::collections::BTreeMap;

use crate::error::Result;

/// Store-assigned document identity. Always greater than zero.
pub type DocId = u64;

/// Store-assigned token identity. Always greater than zero.
pub type TokenId = u64;

/// Mapping from document id to the positions at which one token occurs
/// within that document. Position lists are kept ascending with no
/// duplicates everywhere except inside the not-yet-flushed buffer.
pub type PostingsMap = BTreeMap<DocId, Vec<u64>>;

/// Merge two postings maps for the same token.
///
/// For every document id appearing in either input, the result's position
/// list is the sorted, duplicate-free union of the two inputs' lists for
/// that id. The operation is commutative, associative when chained, and
/// idempotent: merging a map with itself or with an empty map yields the
/// sorted, deduplicated form of that map.
pub fn merge_postings(a: &PostingsMap, b: &PostingsMap) -> PostingsMap {
    let mut merged = PostingsMap::new();

    for (&doc_id, positions) in a.iter().chain(b.iter()) {
        merged
            .entry(doc_id)
            .or_insert_with(Vec::new)
            .extend_from_slice(positions);
    }

    for positions in merged.values_mut() {
        positions.sort_unstable();
        positions.dedup();
    }

    merged
}

/// Serialize a postings map as a JSON object keyed by document id.
pub fn encode_postings(postings: &PostingsMap) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(postings)?)
}

/// Decode a serialized postings blob.
///
/// An empty blob means "no postings yet" and decodes to the empty map, not
/// an error.
pub fn decode_postings(buf: &[u8]) -> Result<PostingsMap> {
    if buf.is_empty() {
        return Ok(PostingsMap::new());
    }
    Ok(serde_json::from_slice(buf)?)
}
