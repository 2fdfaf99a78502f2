//! Kanban board state for a project workspace.
//!
//! The board store owns projects, their ordered columns, and the tasks placed
//! in those columns. It enforces the referential and ordering invariants
//! between them and mediates every mutation, publishing each committed
//! snapshot to subscribers. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The store, drag reconciliation, and replication in [`services`]
//! - Store and replication settings in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
