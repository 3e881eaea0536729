//! Database query modules.
//!
//! - hunters: inserts in every binding style, reads, delete, and update

pub mod hunters;
