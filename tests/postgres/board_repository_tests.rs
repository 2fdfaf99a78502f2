//! Save and load of whole boards against an embedded `PostgreSQL` cluster.

use crate::postgres::helpers::{
    CleanupGuard, FrozenClock, empty_store, ensure_template, sample_board, setup_repository,
    test_runtime,
};
use kanban_store::board::{
    config::ReplicationConfig,
    domain::TaskPatch,
    ports::BoardRepository,
    services::{BoardStore, SnapshotReplicator},
};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn load_from_fresh_database_is_empty(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_load_empty_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");

    let tables = test_runtime().block_on(repo.load()).expect("load");

    assert!(tables.is_empty());
}

#[rstest]
fn saved_board_loads_back_unchanged(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_round_trip_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let mut store = empty_store();
    sample_board(&mut store).expect("sample board");
    let rt = test_runtime();

    rt.block_on(repo.save(&store.snapshot())).expect("save");
    let loaded = rt.block_on(repo.load()).expect("load");

    assert_eq!(loaded, store.snapshot().to_tables());
}

#[rstest]
fn second_save_replaces_the_stored_board(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_save_replaces_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let mut store = empty_store();
    let board = sample_board(&mut store).expect("sample board");
    let rt = test_runtime();
    rt.block_on(repo.save(&store.snapshot())).expect("first save");

    store.delete_project(board.mobile);
    let first_task = *board.tasks.first().expect("sample task");
    store
        .update_task(first_task, &TaskPatch::new().with_title("Ship homepage"))
        .expect("title update");
    rt.block_on(repo.save(&store.snapshot())).expect("second save");
    let loaded = rt.block_on(repo.load()).expect("load");

    assert_eq!(loaded, store.snapshot().to_tables());
    assert_eq!(loaded.projects.len(), 1);
    assert!(loaded.tasks.iter().all(|task| task.project_id() == board.website));
    assert_eq!(
        loaded
            .tasks
            .iter()
            .find(|task| task.id() == first_task)
            .map(|task| task.title()),
        Some("Ship homepage")
    );
}

#[rstest]
fn saving_an_empty_board_clears_storage(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_save_empty_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let mut store = empty_store();
    sample_board(&mut store).expect("sample board");
    let rt = test_runtime();
    rt.block_on(repo.save(&store.snapshot())).expect("first save");

    rt.block_on(repo.save(&empty_store().snapshot()))
        .expect("empty save");

    assert!(rt.block_on(repo.load()).expect("load").is_empty());
}

#[rstest]
fn load_keeps_table_order_when_timestamps_tie(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_table_order_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_repository(shared_test_cluster, &db_name).expect("repository setup");
    let mut store = empty_store();
    let board = sample_board(&mut store).expect("sample board");
    let rt = test_runtime();

    rt.block_on(repo.save(&store.snapshot())).expect("save");
    let loaded = rt.block_on(repo.load()).expect("load");

    assert_eq!(
        loaded.projects.iter().map(|project| project.id()).collect::<Vec<_>>(),
        [board.website, board.mobile]
    );
    assert_eq!(
        loaded.tasks.iter().map(|task| task.id()).collect::<Vec<_>>(),
        board.tasks
    );
    let website_columns: Vec<_> = loaded
        .columns
        .iter()
        .filter(|column| column.project_id() == board.website)
        .map(|column| column.id())
        .collect();
    assert_eq!(website_columns, board.website_columns);
    assert_eq!(
        loaded
            .columns
            .iter()
            .filter(|column| column.project_id() == board.website)
            .map(|column| column.order())
            .collect::<Vec<_>>(),
        [2, 1, 0]
    );
}

#[rstest]
fn replicated_board_restores_from_postgres(shared_test_cluster: &'static TestCluster) {
    ensure_template(shared_test_cluster).expect("template setup");
    let db_name = format!("test_replication_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = Arc::new(setup_repository(shared_test_cluster, &db_name).expect("repository setup"));
    let (replicator, worker) =
        SnapshotReplicator::channel(Arc::clone(&repo), ReplicationConfig::immediate(1));
    let mut store = empty_store();
    store.subscribe(Arc::new(replicator));

    let board = sample_board(&mut store).expect("sample board");
    let expected = store.snapshot().to_tables();
    drop(store);
    let rt = test_runtime();
    rt.block_on(worker.run());

    let restored = BoardStore::new(Arc::new(FrozenClock::new()))
        .with_tables(rt.block_on(repo.load()).expect("load"));
    assert_eq!(restored.snapshot().to_tables(), expected);
    assert!(restored.project(board.website).is_some());
}
