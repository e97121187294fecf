//! Pocket Browser Storage Layer
//!
//! SQLite persistence for saved tab sessions and settings.
//! Tab state lives in memory; this layer only holds the last saved copy.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
