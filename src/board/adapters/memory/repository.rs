//! In-memory board repository for tests and local runs.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{BoardSnapshot, BoardTables},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    tables: BoardTables,
    saves: usize,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with stored tables.
    #[must_use]
    pub fn with_tables(tables: BoardTables) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState { tables, saves: 0 })),
        }
    }

    /// Returns how many saves have succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the lock is
    /// poisoned.
    pub fn save_count(&self) -> BoardRepositoryResult<usize> {
        let state = self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.saves)
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn save(&self, snapshot: &BoardSnapshot) -> BoardRepositoryResult<()> {
        let tables = snapshot.to_tables();
        let mut state = self.state.write().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.tables = tables;
        state.saves = state.saves.saturating_add(1);
        Ok(())
    }

    async fn load(&self) -> BoardRepositoryResult<BoardTables> {
        let state = self.state.read().map_err(|err| {
            BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tables.clone())
    }
}
