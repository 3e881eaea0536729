//! Hunters-Common: Shared types and error handling.
//!
//! This crate provides functionality used by both the database layer and the
//! exerciser binary:
//!
//! - **Typed IDs**: [`HunterId`] wraps the store-assigned primary key
//! - **Columns**: [`HunterColumn`] names the columns a filter may compare
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use hunters_common::{Error, HunterColumn, HunterId, Result};
//!
//! let id = HunterId::new(1);
//! assert_eq!(id.get(), 1);
//! assert_eq!(HunterColumn::Age.as_sql(), "age");
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_input("age must not be negative"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::HunterId;
pub use types::HunterColumn;
