//! Diesel row models and their mapping to board domain values.

use super::schema::{board_columns, projects, tasks};
use crate::board::{
    domain::{
        Column, ColumnId, DeveloperId, PersistedProjectData, PersistedTaskData, Priority, Project,
        ProjectId, Task, TaskId,
    },
    ports::{BoardRepositoryError, BoardRepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for project records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Position in the saved project table.
    pub seq: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Row model for column records.
///
/// `created_at` is left to the database default.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Position in the saved column table.
    pub seq: i64,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Left-to-right position.
    pub position: i32,
}

/// Row model for task records.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Position in the saved task table.
    pub seq: i64,
    /// Owning project.
    pub project_id: uuid::Uuid,
    /// Column placement.
    pub column_id: uuid::Uuid,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional assignee.
    pub assignee: Option<String>,
    /// Priority storage string.
    pub priority: String,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Converts a table index into its stored `seq` value.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::InvalidRow`] when the index does not fit
/// the `BIGINT` column.
pub fn sequence(index: usize) -> BoardRepositoryResult<i64> {
    i64::try_from(index).map_err(|_| {
        BoardRepositoryError::InvalidRow(format!("table index {index} exceeds the storage range"))
    })
}

impl ProjectRow {
    /// Builds the row stored at table position `seq`.
    #[must_use]
    pub fn new(seq: i64, project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            seq,
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self::from_persisted(PersistedProjectData {
            id: ProjectId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl ColumnRow {
    /// Builds the row stored at table position `seq`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::InvalidRow`] when the column order does
    /// not fit the `INTEGER` column.
    pub fn new(seq: i64, column: &Column) -> BoardRepositoryResult<Self> {
        let position = i32::try_from(column.order()).map_err(|_| {
            BoardRepositoryError::InvalidRow(format!(
                "column {} order {} exceeds the storage range",
                column.id(),
                column.order()
            ))
        })?;
        Ok(Self {
            id: column.id().into_inner(),
            seq,
            project_id: column.project_id().into_inner(),
            name: column.name().to_owned(),
            position,
        })
    }
}

impl TryFrom<ColumnRow> for Column {
    type Error = BoardRepositoryError;

    fn try_from(row: ColumnRow) -> BoardRepositoryResult<Self> {
        let order = u32::try_from(row.position).map_err(|_| {
            BoardRepositoryError::InvalidRow(format!(
                "column {} has negative order {}",
                row.id, row.position
            ))
        })?;
        Ok(Self::from_persisted(
            ColumnId::from_uuid(row.id),
            ProjectId::from_uuid(row.project_id),
            row.name,
            order,
        ))
    }
}

impl TaskRow {
    /// Builds the row stored at table position `seq`.
    #[must_use]
    pub fn new(seq: i64, task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            seq,
            project_id: task.project_id().into_inner(),
            column_id: task.column_id().into_inner(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            assignee: task.assignee().map(|assignee| assignee.as_str().to_owned()),
            priority: task.priority().as_str().to_owned(),
            deadline: task.deadline(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = BoardRepositoryError;

    fn try_from(row: TaskRow) -> BoardRepositoryResult<Self> {
        let priority = Priority::try_from(row.priority.as_str())
            .map_err(|err| BoardRepositoryError::InvalidRow(format!("task {}: {err}", row.id)))?;
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            column_id: ColumnId::from_uuid(row.column_id),
            title: row.title,
            description: row.description,
            assignee: row.assignee.map(DeveloperId::new),
            priority,
            deadline: row.deadline,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
