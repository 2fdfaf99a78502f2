//! Shared test helpers for in-memory integration tests.

use kanban_store::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{ColumnId, NewProject, NewTask, Priority, ProjectId, TaskId},
    services::BoardStore,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Store type used by integration tests.
pub type TestStore = BoardStore<DefaultClock>;

/// Provides an empty store.
#[fixture]
pub fn store() -> TestStore {
    BoardStore::new(Arc::new(DefaultClock))
}

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> Arc<InMemoryBoardRepository> {
    Arc::new(InMemoryBoardRepository::new())
}

/// Identifiers of a populated website board.
pub struct WebsiteBoard {
    pub project: ProjectId,
    pub todo: ColumnId,
    pub in_progress: ColumnId,
    pub done: ColumnId,
    pub mockup: TaskId,
    pub components: TaskId,
}

/// Creates a "Website Redesign" project with two tasks.
///
/// # Errors
///
/// Returns an error if the default columns are missing or a task cannot be
/// placed.
pub fn website_board(store: &mut TestStore) -> Result<WebsiteBoard, eyre::Report> {
    let project = store.create_project(
        NewProject::new("Website Redesign").with_description("Company website refresh"),
    );
    let columns: Vec<ColumnId> = store
        .columns_for(project)
        .iter()
        .map(|column| column.id())
        .collect();
    let [todo, in_progress, done] = columns.as_slice() else {
        return Err(eyre::eyre!("expected three default columns, found {}", columns.len()));
    };
    let mockup = store.create_task(
        NewTask::new(project, *todo, "Design homepage mockup").with_priority(Priority::High),
    )?;
    let components = store.create_task(
        NewTask::new(project, *in_progress, "Build navigation components")
            .with_priority(Priority::Medium),
    )?;
    Ok(WebsiteBoard {
        project,
        todo: *todo,
        in_progress: *in_progress,
        done: *done,
        mockup,
        components,
    })
}
