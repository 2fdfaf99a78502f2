//! In-memory adapters for board ports.

mod repository;

pub use repository::InMemoryBoardRepository;
