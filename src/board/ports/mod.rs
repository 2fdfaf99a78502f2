//! Port contracts for the board.
//!
//! Ports define the interfaces through which the store talks to observers
//! and to storage, without depending on any concrete infrastructure.

pub mod repository;
pub mod subscriber;

pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
pub use subscriber::{BoardSubscriber, SubscriptionId};

#[cfg(test)]
pub use subscriber::MockBoardSubscriber;
