//! Application services for the board.

mod drag;
mod replication;
mod store;

pub use drag::{DragEvent, DragState, DropTarget, MoveCommand, Reconciliation, reconcile};
pub use replication::{ReplicationWorker, SnapshotReplicator};
pub use store::BoardStore;
