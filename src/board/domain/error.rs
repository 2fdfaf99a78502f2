//! Error types for board operations and persisted value parsing.

use super::{ColumnId, ProjectId};
use thiserror::Error;

/// Category of store operation an error belongs to.
///
/// The error slot is cleared only by a later successful operation of the
/// same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Column deletion.
    ColumnDeletion,
    /// Task creation, re-parenting, or move.
    TaskPlacement,
}

/// A mutation that would break a referential invariant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// The column still holds tasks and cannot be deleted.
    #[error(
        "cannot delete a column that contains tasks: column {column} holds {task_count} task(s); move or delete them first"
    )]
    ColumnHasTasks {
        /// Column whose deletion was refused.
        column: ColumnId,
        /// Number of tasks still referencing the column.
        task_count: usize,
    },

    /// The referenced column does not exist.
    #[error("column {column} does not exist")]
    UnknownColumn {
        /// Missing column.
        column: ColumnId,
    },

    /// The referenced column belongs to a different project.
    #[error("column {column} does not belong to project {project}")]
    ColumnNotInProject {
        /// Column that was referenced.
        column: ColumnId,
        /// Project the task belongs to.
        project: ProjectId,
    },
}

/// Operation-level failure held in the store's error slot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A referential invariant would be broken.
    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolation),
}

impl BoardError {
    /// Returns the kind of operation that produced this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConstraintViolation(ConstraintViolation::ColumnHasTasks { .. }) => {
                ErrorKind::ColumnDeletion
            }
            Self::ConstraintViolation(
                ConstraintViolation::UnknownColumn { .. }
                | ConstraintViolation::ColumnNotInProject { .. },
            ) => ErrorKind::TaskPlacement,
        }
    }
}

/// Error returned while parsing task priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
