//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SakuinArgs};
use crate::error::Result;

/// Result structure for index builds.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexingResult {
    pub db_path: String,
    pub documents_indexed: u64,
    pub tokens_flushed: u64,
    pub flushes: u64,
    pub duration_ms: u64,
    pub docs_per_second: f64,
}

/// Result structure for index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub db_path: String,
    pub document_count: u64,
    pub token_len: Option<String>,
}

/// Result structure for postings lookups.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostingsResult {
    pub token: String,
    pub token_id: u64,
    pub doc_frequency: u64,
    pub postings: Vec<PostingEntry>,
}

/// One document's entry within a postings lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostingEntry {
    pub doc_id: u64,
    pub title: Option<String>,
    pub positions: Vec<u64>,
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SakuinArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result)?);
            Ok(())
        }
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SakuinArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;

    if std::any::type_name::<T>().contains("PostingsResult") {
        output_postings_human(&value);
    } else {
        output_fields_human(&value);
    }

    Ok(())
}

/// Print top-level fields as `key: value` lines.
fn output_fields_human(value: &serde_json::Value) {
    if let Some(map) = value.as_object() {
        for (key, val) in map {
            match val {
                serde_json::Value::Null => println!("{key}: -"),
                serde_json::Value::String(s) => println!("{key}: {s}"),
                other => println!("{key}: {other}"),
            }
        }
    }
}

/// Print a postings lookup: header fields, then one line per document.
fn output_postings_human(value: &serde_json::Value) {
    let token = value["token"].as_str().unwrap_or("");
    let token_id = &value["token_id"];
    let doc_frequency = &value["doc_frequency"];

    println!("token: {token} (id {token_id})");
    println!("doc_frequency: {doc_frequency}");

    if let Some(entries) = value["postings"].as_array() {
        for entry in entries {
            let doc_id = &entry["doc_id"];
            let positions = &entry["positions"];
            match entry["title"].as_str() {
                Some(title) => println!("  doc {doc_id} ({title}): {positions}"),
                None => println!("  doc {doc_id}: {positions}"),
            }
        }
    }
}
