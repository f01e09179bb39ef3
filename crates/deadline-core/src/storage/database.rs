//! SQLite-based persistence.
//!
//! Provides storage for:
//! - The task checklist
//! - Key-value state (persisted timer engine, theme preference)

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::DatabaseError;
use crate::task::Task;

use super::data_dir;

const THEME_KEY: &str = "theme_preference";
const DEFAULT_THEME: &str = "dark";

/// SQLite database for tasks and application state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/deadline.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, DatabaseError> {
        let path = data_dir()?.join("deadline.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                id    INTEGER PRIMARY KEY AUTOINCREMENT,
                text  TEXT NOT NULL,
                done  INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task to the checklist. Returns the new row id.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn add_task(&self, text: &str) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO tasks (text, done) VALUES (?1, 0)",
            params![text],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All tasks in insertion order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, done FROM tasks ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                text: row.get(1)?,
                done: row.get::<_, i64>(2)? != 0,
            })
        })?;
        rows.collect()
    }

    /// Set the done flag on a task. Returns false if the id is unknown.
    pub fn set_task_done(&self, id: i64, done: bool) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "UPDATE tasks SET done = ?1 WHERE id = ?2",
            params![done as i64, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete one task. Returns false if the id is unknown.
    pub fn delete_task(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Delete every task. Returns the number removed.
    pub fn clear_tasks(&self) -> Result<usize, rusqlite::Error> {
        self.conn.execute("DELETE FROM tasks", [])
    }

    // ── Key-value state ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Stored theme preference; defaults to dark.
    pub fn theme_get(&self) -> Result<String, rusqlite::Error> {
        Ok(self
            .kv_get(THEME_KEY)?
            .unwrap_or_else(|| DEFAULT_THEME.to_string()))
    }

    pub fn theme_set(&self, theme: &str) -> Result<(), rusqlite::Error> {
        self.kv_set(THEME_KEY, theme)
    }
}
