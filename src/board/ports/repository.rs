//! Repository port for replicating committed board state to storage.

use crate::board::domain::{BoardSnapshot, BoardTables};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Replaces the stored board with the snapshot's entity tables.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the backing store
    /// rejects the write. The stored board is left as it was.
    async fn save(&self, snapshot: &BoardSnapshot) -> BoardRepositoryResult<()>;

    /// Loads the stored entity tables.
    ///
    /// Returns empty tables when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the backing store
    /// cannot be read or [`BoardRepositoryError::InvalidRow`] when a stored
    /// row cannot be mapped back to a domain value.
    async fn load(&self) -> BoardRepositoryResult<BoardTables>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// A stored row holds a value the domain does not accept.
    #[error("invalid stored row: {0}")]
    InvalidRow(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
