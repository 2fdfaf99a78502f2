//! Board column values.

use super::{ColumnId, ProjectId};
use serde::{Deserialize, Serialize};

/// A named, ordered lane within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    project_id: ProjectId,
    name: String,
    order: u32,
}

impl Column {
    /// Creates a new column at the given position.
    #[must_use]
    pub fn new(project_id: ProjectId, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: ColumnId::new(),
            project_id,
            name: name.into(),
            order,
        }
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: ColumnId,
        project_id: ProjectId,
        name: String,
        order: u32,
    ) -> Self {
        Self {
            id,
            project_id,
            name,
            order,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the left-to-right board position.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    /// Returns a copy of this column with a new name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Returns a copy of this column at a new position.
    #[must_use]
    pub fn reordered(&self, order: u32) -> Self {
        Self {
            order,
            ..self.clone()
        }
    }
}
