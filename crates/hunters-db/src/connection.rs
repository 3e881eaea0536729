//! Database connection management.
//!
//! The exerciser holds exactly one connection for its whole run, so there is
//! no pool here: callers own the returned [`Connection`] and it is closed when
//! dropped.

use std::path::Path;

use hunters_common::{Error, Result};
use rusqlite::{Connection, OpenFlags};

/// Open the SQLite database file at `path`, creating it if it doesn't exist.
///
/// The parent directory must already exist; a missing directory is reported
/// as a connection failure rather than created on the caller's behalf.
///
/// # Example
///
/// ```no_run
/// use hunters_db::connection::open;
///
/// let conn = open("/var/lib/hunters/hunters.db".as_ref()).unwrap();
/// ```
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| {
        Error::database(format!(
            "Failed to open database {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!("Opened database at {}", path.display());
    Ok(conn)
}

/// Open a private in-memory database.
///
/// The database is lost when the connection is dropped.
///
/// # Example
///
/// ```
/// use hunters_db::connection::open_in_memory;
///
/// let conn = open_in_memory().unwrap();
/// ```
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory()
        .map_err(|e| Error::database(format!("Failed to open in-memory database: {}", e)))
}
