//! Storage Layer
//!
//! Organization-scoped persistence over SQLite.

pub mod database;

pub use database::*;
