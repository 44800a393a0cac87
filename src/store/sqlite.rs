//! SQLite-backed store.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Result;
use crate::index::postings::{DocId, TokenId};
use crate::store::Store;

/// Store backed by a single SQLite database file.
///
/// Unique indexes on document titles and token texts enforce the store's
/// uniqueness invariants at the schema level; a duplicate insert surfaces as
/// a constraint error from SQLite. Interning uses `INSERT OR IGNORE` and
/// settings use `INSERT OR REPLACE`, so both are safe to call redundantly.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("path", &self.path)
            .finish()
    }
}

impl SqliteStore {
    /// Open the database at `path`, creating it and its schema on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::init_schema(&conn)?;

        Ok(SqliteStore {
            conn: Mutex::new(conn),
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(SqliteStore {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (key TEXT PRIMARY KEY, value TEXT);
             CREATE TABLE IF NOT EXISTS documents (id INTEGER PRIMARY KEY, title TEXT NOT NULL, body TEXT NOT NULL);
             CREATE TABLE IF NOT EXISTS tokens (id INTEGER PRIMARY KEY, token TEXT NOT NULL, docs_count INT NOT NULL, postings BLOB NOT NULL);
             CREATE UNIQUE INDEX IF NOT EXISTS token_index ON tokens(token);
             CREATE UNIQUE INDEX IF NOT EXISTS title_index ON documents(title);",
        )
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for SqliteStore {
    fn document_id_by_title(&self, title: &str) -> Result<Option<DocId>> {
        let conn = self.conn.lock();
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM documents WHERE title = ?1",
                params![title],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(|id| id as DocId))
    }

    fn document_title(&self, id: DocId) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let title = conn
            .query_row(
                "SELECT title FROM documents WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(title)
    }

    fn insert_document(&self, title: &str, body: &str) -> Result<DocId> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO documents (title, body) VALUES (?1, ?2)",
            params![title, body],
        )?;
        Ok(conn.last_insert_rowid() as DocId)
    }

    fn update_document_body(&self, id: DocId, body: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE documents SET body = ?1 WHERE id = ?2",
            params![body, id as i64],
        )?;
        Ok(())
    }

    fn document_count(&self) -> Result<u64> {
        let conn = self.conn.lock();
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn token_by_text(&self, text: &str) -> Result<Option<(TokenId, u64)>> {
        let conn = self.conn.lock();
        let row: Option<(i64, i64)> = conn
            .query_row(
                "SELECT id, docs_count FROM tokens WHERE token = ?1",
                params![text],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row.map(|(id, count)| (id as TokenId, count as u64)))
    }

    fn insert_token_if_absent(&self, text: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO tokens (token, docs_count, postings) VALUES (?1, 0, ?2)",
            params![text, &[] as &[u8]],
        )?;
        Ok(())
    }

    fn token_text(&self, id: TokenId) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let text = conn
            .query_row(
                "SELECT token FROM tokens WHERE id = ?1",
                params![id as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(text)
    }

    fn postings(&self, id: TokenId) -> Result<Option<(u64, Vec<u8>)>> {
        let conn = self.conn.lock();
        let row: Option<(i64, Vec<u8>)> = conn
            .query_row(
                "SELECT docs_count, postings FROM tokens WHERE id = ?1",
                params![id as i64],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        Ok(row.map(|(count, blob)| (count as u64, blob)))
    }

    fn update_postings(&self, id: TokenId, doc_frequency: u64, postings: &[u8]) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "UPDATE tokens SET docs_count = ?1, postings = ?2 WHERE id = ?3",
            params![doc_frequency as i64, postings, id as i64],
        )?;
        Ok(())
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
