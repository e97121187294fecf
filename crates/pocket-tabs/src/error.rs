//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("History index {index} out of range for {len} entries")]
    InvalidHistory { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] pocket_storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
