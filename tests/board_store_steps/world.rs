//! Shared world state for board store BDD scenarios.

use std::sync::Arc;

use kanban_store::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardError, BoardTables, ColumnId, ProjectId, TaskId},
    services::{BoardStore, ReplicationWorker},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestBoardStore = BoardStore<DefaultClock>;

/// Scenario world for board store behaviour tests.
pub struct BoardWorld {
    pub store: TestBoardStore,
    pub repository: Arc<InMemoryBoardRepository>,
    pub worker: Option<ReplicationWorker<InMemoryBoardRepository>>,
    pub last_committed: Option<BoardTables>,
    pub last_result: Option<Result<(), BoardError>>,
}

impl BoardWorld {
    /// Creates a world with an empty board and no replication.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: BoardStore::new(Arc::new(DefaultClock)),
            repository: Arc::new(InMemoryBoardRepository::new()),
            worker: None,
            last_committed: None,
            last_result: None,
        }
    }

    /// Finds a project by name.
    pub fn project_named(&self, name: &str) -> Result<ProjectId, eyre::Report> {
        self.store
            .projects()
            .iter()
            .find(|project| project.name() == name)
            .map(|project| project.id())
            .ok_or_else(|| eyre::eyre!("no project named {name:?}"))
    }

    /// Finds a column of the active project by name.
    pub fn column_named(&self, name: &str) -> Result<ColumnId, eyre::Report> {
        let project = self
            .store
            .active_project()
            .ok_or_else(|| eyre::eyre!("no active project in scenario world"))?;
        self.store
            .columns_for(project.id())
            .into_iter()
            .find(|column| column.name() == name)
            .map(|column| column.id())
            .ok_or_else(|| eyre::eyre!("no column named {name:?}"))
    }

    /// Finds a task by title.
    pub fn task_titled(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.store
            .snapshot()
            .tasks()
            .iter()
            .find(|task| task.title() == title)
            .map(|task| task.id())
            .ok_or_else(|| eyre::eyre!("no task titled {title:?}"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
