//! Task values, priorities, and task creation and update payloads.

use super::{ColumnId, DeveloperId, ParsePriorityError, ProjectId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Needs immediate attention.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// A unit of work placed in exactly one column of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    assignee: Option<DeveloperId>,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted column placement.
    pub column_id: ColumnId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted assignee, if any.
    pub assignee: Option<DeveloperId>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted deadline, if any.
    pub deadline: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task inside a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    project_id: ProjectId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    assignee: Option<DeveloperId>,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Creates a payload with the required placement and title.
    #[must_use]
    pub fn new(project_id: ProjectId, column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            column_id,
            title: title.into(),
            description: None,
            assignee: None,
            priority: Priority::default(),
            deadline: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: DeveloperId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns the target project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }
}

/// Partial update for a task.
///
/// Nullable fields are doubly optional: `None` leaves the field unchanged,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    project_id: Option<ProjectId>,
    column_id: Option<ColumnId>,
    title: Option<String>,
    description: Option<Option<String>>,
    assignee: Option<Option<DeveloperId>>,
    priority: Option<Priority>,
    deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-parents the task to another project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Moves the task to another column.
    #[must_use]
    pub const fn with_column(mut self, column_id: ColumnId) -> Self {
        self.column_id = Some(column_id);
        self
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Option<DeveloperId>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces or clears the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns `true` when the patch changes the task's placement.
    #[must_use]
    pub const fn changes_placement(&self) -> bool {
        self.project_id.is_some() || self.column_id.is_some()
    }

    /// Returns `true` when the patch sets no field besides the placement.
    #[must_use]
    pub const fn touches_only_placement(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
            && self.priority.is_none()
            && self.deadline.is_none()
    }
}

impl Task {
    /// Creates a new task stamped with the current clock time.
    #[must_use]
    pub fn new(data: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: data.project_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            priority: data.priority,
            deadline: data.deadline,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            column_id: data.column_id,
            title: data.title,
            description: data.description,
            assignee: data.assignee,
            priority: data.priority,
            deadline: data.deadline,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the column the task currently sits in.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&DeveloperId> {
        self.assignee.as_ref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the project and column the task would occupy after `patch`.
    #[must_use]
    pub fn placement_after(&self, patch: &TaskPatch) -> (ProjectId, ColumnId) {
        (
            patch.project_id.unwrap_or(self.project_id),
            patch.column_id.unwrap_or(self.column_id),
        )
    }

    /// Returns a copy of this task with the patch merged in and `updated_at`
    /// refreshed.
    #[must_use]
    pub fn patched(&self, patch: &TaskPatch, clock: &impl Clock) -> Self {
        let (project_id, column_id) = self.placement_after(patch);
        Self {
            id: self.id,
            project_id,
            column_id,
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            assignee: patch
                .assignee
                .clone()
                .unwrap_or_else(|| self.assignee.clone()),
            priority: patch.priority.unwrap_or(self.priority),
            deadline: patch.deadline.unwrap_or(self.deadline),
            created_at: self.created_at,
            updated_at: clock.utc(),
        }
    }

    /// Returns a copy of this task placed in `column` with `updated_at`
    /// refreshed.
    ///
    /// Equivalent to [`Task::patched`] with a column-only patch.
    #[must_use]
    pub fn moved_to(&self, column: ColumnId, clock: &impl Clock) -> Self {
        self.patched(&TaskPatch::new().with_column(column), clock)
    }
}
