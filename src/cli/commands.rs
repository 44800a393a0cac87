//! Command implementations for the sakuin CLI.

use std::sync::Arc;
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SakuinError};
use crate::index::postings::decode_postings;
use crate::index::writer::{IndexWriter, IndexWriterConfig, TOKEN_LEN_KEY};
use crate::source::{DocumentSource, JsonlSource};
use crate::store::{SqliteStore, Store};

/// Execute a CLI command.
pub fn execute_command(args: SakuinArgs) -> Result<()> {
    match &args.command {
        Command::Index(index_args) => build_index(index_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::Postings(postings_args) => show_postings(postings_args.clone(), &args),
    }
}

/// Build an index from a document dump.
fn build_index(args: IndexArgs, cli_args: &SakuinArgs) -> Result<()> {
    // Building into an existing database is refused; point the writer at a
    // fresh file instead of silently mixing runs.
    if args.db_path.exists() {
        return Err(SakuinError::invalid_operation(format!(
            "{} already exists",
            args.db_path.display()
        )));
    }

    if cli_args.verbosity() > 0 {
        println!(
            "Indexing {} into {}",
            args.source.display(),
            args.db_path.display()
        );
    }

    let start_time = Instant::now();

    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&args.db_path)?);
    let config = IndexWriterConfig {
        token_len: args.ngram,
        flush_threshold: args.threshold,
    };
    let mut writer = IndexWriter::new(store, config)?;

    let mut source = JsonlSource::open(&args.source)?;
    while let Some(doc) = source.next_document()? {
        writer.ingest(&doc.title, &doc.body)?;

        if cli_args.verbosity() > 1 && writer.stats().documents_indexed % 1000 == 0 {
            println!("Indexed {} documents...", writer.stats().documents_indexed);
        }
    }

    // Merge whatever is still buffered before reporting.
    writer.flush()?;

    let duration = start_time.elapsed();
    let stats = writer.stats();

    output_result(
        "Index built successfully",
        &IndexingResult {
            db_path: args.db_path.to_string_lossy().to_string(),
            documents_indexed: stats.documents_indexed,
            tokens_flushed: stats.tokens_flushed,
            flushes: stats.flushes,
            duration_ms: duration.as_millis() as u64,
            docs_per_second: if duration.as_secs_f64() > 0.0 {
                stats.documents_indexed as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
        },
        cli_args,
    )
}

/// Show index statistics.
fn show_stats(args: StatsArgs, cli_args: &SakuinArgs) -> Result<()> {
    let store = open_existing(&args.db_path)?;

    output_result(
        "Index statistics",
        &StatsResult {
            db_path: args.db_path.to_string_lossy().to_string(),
            document_count: store.document_count()?,
            token_len: store.setting(TOKEN_LEN_KEY)?,
        },
        cli_args,
    )
}

/// Show the persisted postings for a token.
fn show_postings(args: PostingsArgs, cli_args: &SakuinArgs) -> Result<()> {
    let store = open_existing(&args.db_path)?;

    let (token_id, doc_frequency) = store.token_by_text(&args.token)?.ok_or_else(|| {
        SakuinError::invalid_operation(format!("token {:?} is not in the index", args.token))
    })?;

    let postings = match store.postings(token_id)? {
        Some((_, blob)) => decode_postings(&blob)?,
        None => Default::default(),
    };

    let mut entries = Vec::with_capacity(postings.len());
    for (doc_id, positions) in postings {
        let title = if args.titles {
            store.document_title(doc_id)?
        } else {
            None
        };
        entries.push(PostingEntry {
            doc_id,
            title,
            positions,
        });
    }

    output_result(
        "Postings",
        &PostingsResult {
            token: args.token.clone(),
            token_id,
            doc_frequency,
            postings: entries,
        },
        cli_args,
    )
}

fn open_existing(db_path: &std::path::Path) -> Result<SqliteStore> {
    if !db_path.exists() {
        return Err(SakuinError::invalid_operation(format!(
            "{} does not exist",
            db_path.display()
        )));
    }
    SqliteStore::open(db_path)
}
