//! Immutable views of the board's entity tables.

use super::{BoardError, Column, ColumnId, Project, ProjectId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Owned entity tables, as exchanged with persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTables {
    /// Projects in insertion order.
    pub projects: Vec<Project>,
    /// Columns in insertion order.
    pub columns: Vec<Column>,
    /// Tasks in insertion order.
    pub tasks: Vec<Task>,
}

impl BoardTables {
    /// Returns `true` when no entity is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.columns.is_empty() && self.tasks.is_empty()
    }
}

/// A committed state of the board.
///
/// Tables are shared behind `Arc`s: a commit swaps in freshly built tables
/// and never mutates entities that a previous snapshot can still see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    version: u64,
    projects: Arc<Vec<Project>>,
    columns: Arc<Vec<Column>>,
    tasks: Arc<Vec<Task>>,
    active_project: Option<Project>,
    error: Option<BoardError>,
}

impl BoardSnapshot {
    /// Creates a version-zero snapshot over the given tables with no
    /// selection and no error.
    #[must_use]
    pub fn from_tables(tables: BoardTables) -> Self {
        Self {
            version: 0,
            projects: Arc::new(tables.projects),
            columns: Arc::new(tables.columns),
            tasks: Arc::new(tables.tasks),
            active_project: None,
            error: None,
        }
    }

    /// Returns the commit counter; each committed transition increments it.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns all projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns all columns, across projects, in table order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns all tasks, across projects, in table order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the selected project, if any.
    #[must_use]
    pub const fn active_project(&self) -> Option<&Project> {
        self.active_project.as_ref()
    }

    /// Returns the last operation failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&BoardError> {
        self.error.as_ref()
    }

    /// Looks up a project.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id() == id)
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Returns the project's columns sorted by board position.
    ///
    /// Columns sharing an order keep their table order.
    #[must_use]
    pub fn columns_for(&self, project: ProjectId) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self
            .columns
            .iter()
            .filter(|column| column.project_id() == project)
            .collect();
        columns.sort_by_key(|column| column.order());
        columns
    }

    /// Returns the project's tasks in table order.
    #[must_use]
    pub fn tasks_for(&self, project: ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.project_id() == project)
            .collect()
    }

    /// Returns the tasks placed in a column, in table order.
    #[must_use]
    pub fn tasks_in_column(&self, column: ColumnId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.column_id() == column)
            .collect()
    }

    /// Returns `true` when both snapshots share the same entity tables.
    ///
    /// Transitions that only touch the selection or the error slot keep the
    /// tables of the previous snapshot.
    #[must_use]
    pub fn shares_tables_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.projects, &other.projects)
            && Arc::ptr_eq(&self.columns, &other.columns)
            && Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    /// Copies the entity tables out of the snapshot.
    #[must_use]
    pub fn to_tables(&self) -> BoardTables {
        BoardTables {
            projects: self.projects.to_vec(),
            columns: self.columns.to_vec(),
            tasks: self.tasks.to_vec(),
        }
    }

    pub(crate) fn next(&self) -> SnapshotBuilder<'_> {
        SnapshotBuilder {
            base: self,
            projects: None,
            columns: None,
            tasks: None,
            active_project: None,
            error: None,
        }
    }
}

/// Assembles the snapshot that follows `base`, reusing every table that the
/// transition does not replace.
#[derive(Debug)]
pub(crate) struct SnapshotBuilder<'a> {
    base: &'a BoardSnapshot,
    projects: Option<Vec<Project>>,
    columns: Option<Vec<Column>>,
    tasks: Option<Vec<Task>>,
    active_project: Option<Option<Project>>,
    error: Option<Option<BoardError>>,
}

impl SnapshotBuilder<'_> {
    pub(crate) fn projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = Some(projects);
        self
    }

    pub(crate) fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }

    pub(crate) fn tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    pub(crate) fn active_project(mut self, active_project: Option<Project>) -> Self {
        self.active_project = Some(active_project);
        self
    }

    pub(crate) fn error(mut self, error: Option<BoardError>) -> Self {
        self.error = Some(error);
        self
    }

    pub(crate) fn build(self) -> BoardSnapshot {
        let base = self.base;
        BoardSnapshot {
            version: base.version.wrapping_add(1),
            projects: self
                .projects
                .map_or_else(|| Arc::clone(&base.projects), Arc::new),
            columns: self
                .columns
                .map_or_else(|| Arc::clone(&base.columns), Arc::new),
            tasks: self.tasks.map_or_else(|| Arc::clone(&base.tasks), Arc::new),
            active_project: self
                .active_project
                .unwrap_or_else(|| base.active_project.clone()),
            error: self.error.unwrap_or_else(|| base.error.clone()),
        }
    }
}
