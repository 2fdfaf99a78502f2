//! Replication into the in-memory repository.

use super::helpers::{TestStore, repo, store, website_board};
use kanban_store::board::{
    adapters::memory::InMemoryBoardRepository,
    config::ReplicationConfig,
    ports::BoardRepository,
    services::{BoardStore, SnapshotReplicator},
};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replicated_board_restores_into_a_new_store(
    mut store: TestStore,
    repo: Arc<InMemoryBoardRepository>,
) -> Result<(), eyre::Report> {
    let (replicator, worker) =
        SnapshotReplicator::channel(Arc::clone(&repo), ReplicationConfig::immediate(1));
    let handle = tokio::spawn(worker.run());
    store.subscribe(Arc::new(replicator));

    let board = website_board(&mut store)?;
    store.move_task(board.mockup, board.done)?;
    let expected = store.snapshot().to_tables();
    drop(store);
    handle.await?;

    let restored = BoardStore::new(Arc::new(DefaultClock)).with_tables(repo.load().await?);

    assert_eq!(restored.snapshot().to_tables(), expected);
    assert!(restored.active_project().is_none());
    assert_eq!(
        restored.task(board.mockup).map(|task| task.column_id()),
        Some(board.done)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_repository_loads_empty_tables(
    repo: Arc<InMemoryBoardRepository>,
) -> Result<(), eyre::Report> {
    let tables = repo.load().await?;

    assert!(tables.is_empty());
    assert_eq!(repo.save_count()?, 0);
    Ok(())
}
