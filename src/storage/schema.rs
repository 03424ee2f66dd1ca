//! Database schema and connection management

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// SQLite store of generated lineups
pub struct LineupDatabase {
    pub(crate) conn: Connection,
}

impl LineupDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS runs (
                run_id INTEGER PRIMARY KEY AUTOINCREMENT,
                site TEXT NOT NULL,
                sport TEXT NOT NULL,
                requested INTEGER NOT NULL,
                generated INTEGER NOT NULL,
                salary_cap INTEGER NOT NULL,
                best_points REAL,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        // Players are kept as JSON; lineups are always read back whole.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS run_lineups (
                run_id INTEGER NOT NULL,
                lineup_number INTEGER NOT NULL,
                total_salary INTEGER NOT NULL,
                total_points REAL NOT NULL,
                status TEXT NOT NULL,
                players TEXT NOT NULL,
                PRIMARY KEY (run_id, lineup_number),
                FOREIGN KEY (run_id) REFERENCES runs(run_id) ON DELETE CASCADE
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_runs_site_sport ON runs(site, sport)",
            [],
        )?;

        Ok(())
    }
}
