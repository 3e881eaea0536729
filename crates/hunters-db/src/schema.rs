//! Schema for the hunters table.
//!
//! There is a single table and it is created idempotently on every run, so
//! no migration tracking is kept.

use hunters_common::{Error, Result};
use rusqlite::Connection;

/// DDL for the hunters table.
///
/// `VARCHAR(50)` documents the intended bound; SQLite does not enforce
/// declared lengths, so the `CHECK` constraints carry it instead.
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
pub const HUNTERS_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS hunters (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(50) NOT NULL CHECK (length(name) BETWEEN 1 AND 50),
    age  INTEGER NOT NULL CHECK (age >= 0),
    unit VARCHAR(50) NOT NULL CHECK (length(unit) BETWEEN 1 AND 50)
)";

/// Create the hunters table if it doesn't exist.
///
/// Safe to call any number of times.
pub fn ensure_hunters_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(HUNTERS_TABLE_DDL)
        .map_err(|e| Error::database(format!("Failed to create hunters table: {}", e)))?;
    tracing::debug!("Ensured hunters table");
    Ok(())
}

/// Remove every row and restart the id sequence at 1.
///
/// Runs two statements; callers that need them applied together should run
/// this inside a transaction.
///
/// # Returns
///
/// * `Ok(usize)` - Number of rows removed
/// * `Err(Error)` - If the table is missing or a database error occurs
pub fn clear_hunters_table(conn: &Connection) -> Result<usize> {
    let removed = conn
        .execute("DELETE FROM hunters", [])
        .map_err(|e| Error::database(e.to_string()))?;

    conn.execute("DELETE FROM sqlite_sequence WHERE name = 'hunters'", [])
        .map_err(|e| Error::database(e.to_string()))?;

    tracing::debug!(removed, "Cleared hunters table");
    Ok(removed)
}

/// Check whether a table with the given name exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(count > 0)
}
