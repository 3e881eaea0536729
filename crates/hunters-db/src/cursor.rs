//! Buffered statement results and their metadata.
//!
//! A read returns a [`Cursor`] holding every row it produced together with
//! the counters a caller may want to report. A write returns an
//! [`Execution`]. Both are detached from the statement that produced them,
//! which is finalized before the query function returns.

use hunters_common::HunterId;
use rusqlite::Connection;

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Execution {
    /// Rows changed by the statement (summed across a batch).
    pub affected_rows: usize,
    /// Most recent id inserted on the connection, if any.
    pub last_insert_id: Option<HunterId>,
}

impl Execution {
    pub(crate) fn after(conn: &Connection, affected_rows: usize) -> Self {
        Self {
            affected_rows,
            last_insert_id: last_insert_id(conn),
        }
    }
}

/// Forward-only view over the rows of one executed query.
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<T> {
    rows: Vec<T>,
    position: usize,
    result_count: usize,
    last_insert_id: Option<HunterId>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(conn: &Connection, rows: Vec<T>) -> Self {
        Self {
            result_count: rows.len(),
            rows,
            position: 0,
            last_insert_id: last_insert_id(conn),
        }
    }

    /// Count reported by the statement when it was executed.
    pub fn result_count(&self) -> usize {
        self.result_count
    }

    /// Number of rows held by the cursor.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Most recent id inserted on the connection when the query ran.
    pub fn last_insert_id(&self) -> Option<HunterId> {
        self.last_insert_id
    }

    /// Index of the next row to be fetched.
    pub fn position(&self) -> usize {
        self.position
    }

    /// All rows, regardless of position.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Fetch the next row and advance.
    pub fn fetch_one(&mut self) -> Option<&T> {
        let row = self.rows.get(self.position)?;
        self.position += 1;
        Some(row)
    }

    /// Fetch up to `n` rows and advance past them.
    pub fn fetch_many(&mut self, n: usize) -> &[T] {
        let start = self.position;
        let end = start.saturating_add(n).min(self.rows.len());
        self.position = end;
        &self.rows[start..end]
    }

    /// Fetch every remaining row.
    pub fn fetch_all(&mut self) -> &[T] {
        let start = self.position;
        self.position = self.rows.len();
        &self.rows[start..]
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

// SQLite reports 0 when nothing has been inserted on the connection.
fn last_insert_id(conn: &Connection) -> Option<HunterId> {
    match conn.last_insert_rowid() {
        0 => None,
        id => Some(HunterId::new(id)),
    }
}
