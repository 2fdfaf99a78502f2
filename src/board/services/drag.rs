//! Drag-and-drop reconciliation.
//!
//! The drag collaborator reports gestures as [`DragEvent`]s carrying raw,
//! string-typed identities. [`reconcile`] turns one event into the next
//! [`DragState`] and, when the task should change column, a
//! [`MoveCommand`]. It reads the board but never changes it, so gestures can
//! be tested without any pointer input; the store applies the command.

use crate::board::domain::{BoardSnapshot, ColumnId, TaskId};
use uuid::Uuid;

/// A drag gesture event as reported by the drag collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// A task was picked up.
    Start {
        /// Identity of the dragged element.
        active: String,
    },
    /// The dragged element hovers over a candidate target.
    ///
    /// May fire many times per gesture, or not at all.
    Over {
        /// Identity of the dragged element.
        active: String,
        /// Identity of the hovered target, if any.
        over: Option<String>,
    },
    /// The gesture finished. `over` is `None` when it was cancelled.
    End {
        /// Identity of the dragged element.
        active: String,
        /// Identity of the final target, if any.
        over: Option<String>,
    },
}

/// Classified drop target identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A column drop zone.
    Column(ColumnId),
    /// Anything else, such as another task card.
    Item(String),
}

impl DropTarget {
    /// Classifies a raw target identity.
    ///
    /// Identities made of `column_prefix` immediately followed by a column id,
    /// with nothing around it, are column targets. Returns `None` for an
    /// empty identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_store::board::{domain::ColumnId, services::DropTarget};
    ///
    /// let column = ColumnId::new();
    /// let raw = column.target_id("column-");
    /// assert_eq!(DropTarget::parse(&raw, "column-"), Some(DropTarget::Column(column)));
    /// assert_eq!(DropTarget::parse("", "column-"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str, column_prefix: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        // Exact match only: no whitespace around the column id.
        let column = raw
            .strip_prefix(column_prefix)
            .and_then(|rest| Uuid::parse_str(rest).ok())
            .map(ColumnId::from_uuid);
        Some(column.map_or_else(|| Self::Item(raw.to_owned()), Self::Column))
    }
}

/// Transient state of an in-flight gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    active_task: Option<TaskId>,
}

impl DragState {
    /// Returns the task being dragged, if a gesture is in flight.
    #[must_use]
    pub const fn active_task(&self) -> Option<TaskId> {
        self.active_task
    }

    /// Returns `true` when no gesture is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.active_task.is_none()
    }
}

/// Request to place a task in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCommand {
    /// Task to move.
    pub task: TaskId,
    /// Destination column.
    pub destination: ColumnId,
}

/// Outcome of reconciling one drag event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
    /// Drag state after the event.
    pub state: DragState,
    /// Move to apply to the board, if any.
    pub command: Option<MoveCommand>,
}

/// Reconciles a drag event against the current board.
///
/// Hovering over a column other than the task's current one yields a move,
/// so the board follows the pointer live. Dropping on a column yields a move
/// as well; the store treats a move into the current column as a no-op.
/// Task targets, empty targets, and targets equal to the dragged identity
/// yield nothing.
#[must_use]
pub fn reconcile(
    snapshot: &BoardSnapshot,
    state: &DragState,
    event: &DragEvent,
    column_prefix: &str,
) -> Reconciliation {
    match event {
        DragEvent::Start { active } => {
            let active_task = active
                .parse::<TaskId>()
                .ok()
                .filter(|id| snapshot.task(*id).is_some());
            Reconciliation {
                state: DragState { active_task },
                command: None,
            }
        }
        DragEvent::Over { active, over } => Reconciliation {
            state: *state,
            command: column_move(active, over.as_deref(), column_prefix).filter(|command| {
                snapshot
                    .task(command.task)
                    .is_some_and(|task| task.column_id() != command.destination)
            }),
        },
        DragEvent::End { active, over } => Reconciliation {
            state: DragState::default(),
            command: column_move(active, over.as_deref(), column_prefix),
        },
    }
}

fn column_move(active: &str, over: Option<&str>, column_prefix: &str) -> Option<MoveCommand> {
    let target = over.filter(|raw| *raw != active)?;
    let DropTarget::Column(destination) = DropTarget::parse(target, column_prefix)? else {
        return None;
    };
    let task = active.parse::<TaskId>().ok()?;
    Some(MoveCommand { task, destination })
}
