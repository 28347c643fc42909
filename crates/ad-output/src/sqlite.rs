//! SQLite output backend (feature `sqlite`).
//!
//! Creates (or reopens) `dispatch.db` in the configured output directory with
//! two tables: `dispatches` and `sessions`.  Rows from earlier sessions are
//! kept; each session gets a fresh `session_id`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{DispatchRow, OutputResult, SummaryRow};

/// Writes dispatch output to an SQLite database.
pub struct SqliteWriter {
    conn:       Connection,
    session_id: i64,
    finished:   bool,
}

impl SqliteWriter {
    /// Open (or create) `dispatch.db` in `dir`, initialise the schema, and
    /// open a new session row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("dispatch.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS sessions (
                 session_id       INTEGER PRIMARY KEY AUTOINCREMENT,
                 served           INTEGER,
                 unassigned       INTEGER,
                 total_distance   INTEGER,
                 average_distance INTEGER
             );
             CREATE TABLE IF NOT EXISTS dispatches (
                 session_id        INTEGER NOT NULL REFERENCES sessions(session_id),
                 cycle             INTEGER NOT NULL,
                 patient           TEXT    NOT NULL,
                 priority          TEXT    NOT NULL,
                 unit              INTEGER NOT NULL,
                 origin            TEXT    NOT NULL,
                 distance          INTEGER NOT NULL,
                 hospital          TEXT,
                 hospital_distance INTEGER
             );",
        )?;
        conn.execute("INSERT INTO sessions DEFAULT VALUES", [])?;
        let session_id = conn.last_insert_rowid();

        Ok(Self { conn, session_id, finished: false })
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }
}

impl OutputWriter for SqliteWriter {
    fn write_dispatch(&mut self, row: &DispatchRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO dispatches \
             (session_id, cycle, patient, priority, unit, origin, distance, hospital, hospital_distance) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        stmt.execute(rusqlite::params![
            self.session_id,
            row.cycle,
            row.patient,
            row.priority.as_str(),
            row.unit.0,
            row.origin,
            row.distance,
            row.hospital,
            row.hospital_distance,
        ])?;
        Ok(())
    }

    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "UPDATE sessions \
             SET served = ?2, unassigned = ?3, total_distance = ?4, average_distance = ?5 \
             WHERE session_id = ?1",
            rusqlite::params![
                self.session_id,
                row.served,
                row.unassigned,
                row.total_distance,
                row.average_distance,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
