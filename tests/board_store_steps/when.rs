//! When steps for board store BDD scenarios.

use super::world::{BoardWorld, run_async};
use kanban_store::board::{
    domain::NewProject,
    services::{BoardStore, DragEvent, DragState},
};
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use std::sync::Arc;

#[when(r#"a project named "{name}" is created"#)]
fn project_is_created(world: &mut BoardWorld, name: String) {
    world.store.create_project(NewProject::new(name));
}

#[when(r#"the column "{column}" is deleted"#)]
fn column_is_deleted(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column_named(&column)?;
    world.last_result = Some(world.store.delete_column(column_id));
    Ok(())
}

#[when(r#"the task "{title}" is moved to column "{column}""#)]
fn task_is_moved(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let destination = world.column_named(&column)?;
    world.last_result = Some(world.store.move_task(task, destination));
    Ok(())
}

#[when(r#"the task "{title}" is dragged over column "{column}" and dropped"#)]
fn task_is_dragged(
    world: &mut BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let active = world.task_titled(&title)?.to_string();
    let prefix = world.store.config().column_target_prefix.clone();
    let target = world.column_named(&column)?.target_id(&prefix);

    let mut state = world.store.handle_drag(
        &DragState::default(),
        &DragEvent::Start {
            active: active.clone(),
        },
    );
    state = world.store.handle_drag(
        &state,
        &DragEvent::Over {
            active: active.clone(),
            over: Some(target.clone()),
        },
    );
    state = world.store.handle_drag(
        &state,
        &DragEvent::End {
            active,
            over: Some(target),
        },
    );
    eyre::ensure!(state.is_idle(), "drag gesture left state behind");
    Ok(())
}

#[when(r#"the project "{name}" is deleted"#)]
fn project_is_deleted(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let project = world.project_named(&name)?;
    world.store.delete_project(project);
    Ok(())
}

#[when("the board store shuts down")]
fn board_store_shuts_down(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    world.last_committed = Some(world.store.snapshot().to_tables());
    // Dropping the store drops the replicator and closes the channel.
    world.store = BoardStore::new(Arc::new(DefaultClock));
    let worker = world
        .worker
        .take()
        .ok_or_else(|| eyre::eyre!("replication was not configured"))?;
    run_async(worker.run());
    Ok(())
}
