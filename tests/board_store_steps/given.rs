//! Given steps for board store BDD scenarios.

use std::sync::Arc;

use super::world::BoardWorld;
use eyre::WrapErr;
use kanban_store::board::{
    config::ReplicationConfig,
    domain::{NewProject, NewTask},
    services::SnapshotReplicator,
};
use rstest_bdd_macros::given;

#[given("board replication to an in-memory repository")]
fn board_replication(world: &mut BoardWorld) {
    let (replicator, worker) = SnapshotReplicator::channel(
        Arc::clone(&world.repository),
        ReplicationConfig::immediate(1),
    );
    world.store.subscribe(Arc::new(replicator));
    world.worker = Some(worker);
}

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut BoardWorld, name: String) {
    world.store.create_project(NewProject::new(name));
}

#[given(r#"a task "{title}" in column "{column}""#)]
fn task_in_column(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column_named(&column)?;
    let project = world
        .store
        .column(column_id)
        .map(|found| found.project_id())
        .ok_or_else(|| eyre::eyre!("column {column:?} vanished"))?;
    world
        .store
        .create_task(NewTask::new(project, column_id, title))
        .wrap_err("create task for scenario setup")?;
    Ok(())
}
