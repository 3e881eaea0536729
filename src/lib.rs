//! Hunters - schema and CRUD exerciser
//!
//! This library crate exposes the run sequence for integration testing.

pub mod config;
pub mod exerciser;
pub mod report;
