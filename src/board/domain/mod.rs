//! Domain model for the Kanban board.
//!
//! Projects own ordered columns and the tasks placed in them. Values are
//! immutable: every change produces a new value, which lets the store hand
//! out snapshots that never observe a half-applied mutation.

mod column;
mod developer;
mod error;
mod ids;
mod project;
mod snapshot;
mod task;

pub use column::Column;
pub use developer::{Developer, DeveloperDirectory};
pub use error::{BoardError, ConstraintViolation, ErrorKind, ParsePriorityError};
pub use ids::{ColumnId, DeveloperId, ProjectId, TaskId};
pub use project::{NewProject, PersistedProjectData, Project, ProjectPatch};
pub use snapshot::{BoardSnapshot, BoardTables};
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskPatch};

pub(crate) use snapshot::SnapshotBuilder;
