//! Hunters-DB: Schema, models, and query operations for the hunters table
//!
//! This crate provides database functionality using SQLite through rusqlite.
//! Every operation takes the caller's connection explicitly; wrap calls in a
//! `rusqlite::Transaction` to control when they become durable.
//!
//! # Modules
//!
//! - `connection` - Opening file-backed and in-memory databases
//! - `schema` - Idempotent table creation and clearing
//! - `models` - Rust models matching the table
//! - `cursor` - Buffered read results and write outcomes
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```
//! use hunters_db::{connection, queries::hunters, schema};
//!
//! let mut conn = connection::open_in_memory().unwrap();
//! schema::ensure_hunters_table(&conn).unwrap();
//!
//! let tx = conn.transaction().unwrap();
//! hunters::insert_positional(&tx, "Yoruichi", 25, "Avis").unwrap();
//! tx.commit().unwrap();
//!
//! let all = hunters::select_all(&conn).unwrap();
//! assert_eq!(all.row_count(), 1);
//! ```

pub mod connection;
pub mod cursor;
pub mod models;
pub mod queries;
pub mod schema;

pub use cursor::{Cursor, Execution};
pub use models::{Hunter, NewHunter};
