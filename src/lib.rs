//! Kanban store: project, column, and task state for a Kanban board.
//!
//! This crate owns the board state behind a single mutation path, enforces
//! the referential invariants between projects, columns, and tasks, and
//! publishes every committed snapshot to subscribers. Committed snapshots
//! can be replicated to a repository in the background.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Immutable board values with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for subscribers and storage
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: The board store, drag reconciliation, and replication

pub mod board;
