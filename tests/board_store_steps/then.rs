//! Then steps for board store BDD scenarios.

use super::world::{BoardWorld, run_async};
use kanban_store::board::{
    domain::{BoardError, ConstraintViolation},
    ports::BoardRepository,
};
use rstest_bdd_macros::then;

#[then(r#"the active project is "{name}""#)]
fn active_project_is(world: &BoardWorld, name: String) -> Result<(), eyre::Report> {
    let active = world
        .store
        .active_project()
        .ok_or_else(|| eyre::eyre!("no active project"))?;
    eyre::ensure!(
        active.name() == name,
        "expected active project {name:?}, found {:?}",
        active.name()
    );
    Ok(())
}

#[then(r#"the project has columns "{names}""#)]
fn project_has_columns(world: &BoardWorld, names: String) -> Result<(), eyre::Report> {
    let project = world
        .store
        .active_project()
        .ok_or_else(|| eyre::eyre!("no active project"))?;
    let expected: Vec<&str> = names.split(", ").collect();
    let actual: Vec<&str> = world
        .store
        .columns_for(project.id())
        .into_iter()
        .map(|column| column.name())
        .collect();
    eyre::ensure!(
        actual == expected,
        "expected columns {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the operation fails because the column has tasks")]
fn operation_fails_column_has_tasks(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    if !matches!(
        result,
        Err(BoardError::ConstraintViolation(
            ConstraintViolation::ColumnHasTasks { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected ColumnHasTasks error, got {result:?}"));
    }
    eyre::ensure!(
        world.store.last_error() == result.as_ref().err(),
        "error slot does not hold the refusal"
    );
    Ok(())
}

#[then("the operation succeeds")]
fn operation_succeeds(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    eyre::ensure!(result.is_ok(), "expected success, got {result:?}");
    Ok(())
}

#[then("the error slot is empty")]
fn error_slot_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.store.last_error().is_none(),
        "unexpected error: {:?}",
        world.store.last_error()
    );
    Ok(())
}

#[then(r#"the task "{title}" is in column "{column}""#)]
fn task_is_in_column(
    world: &BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = world.task_titled(&title)?;
    let expected = world.column_named(&column)?;
    let actual = world
        .store
        .task(task)
        .map(|found| found.column_id())
        .ok_or_else(|| eyre::eyre!("task {title:?} vanished"))?;
    eyre::ensure!(actual == expected, "task {title:?} is in another column");
    Ok(())
}

#[then("no project is active")]
fn no_project_is_active(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.store.active_project().is_none(),
        "a project is still active"
    );
    Ok(())
}

#[then("the board has no columns or tasks")]
fn board_is_empty(world: &BoardWorld) -> Result<(), eyre::Report> {
    let snapshot = world.store.snapshot();
    eyre::ensure!(snapshot.columns().is_empty(), "columns remain");
    eyre::ensure!(snapshot.tasks().is_empty(), "tasks remain");
    Ok(())
}

#[then("the repository holds the last committed board")]
fn repository_holds_last_board(world: &BoardWorld) -> Result<(), eyre::Report> {
    let expected = world
        .last_committed
        .as_ref()
        .ok_or_else(|| eyre::eyre!("store was not shut down"))?;
    let stored = run_async(world.repository.load())?;
    eyre::ensure!(&stored == expected, "stored board differs from last commit");
    Ok(())
}

#[then("the repository was written once")]
fn repository_written_once(world: &BoardWorld) -> Result<(), eyre::Report> {
    let saves = world.repository.save_count()?;
    eyre::ensure!(saves == 1, "expected one save, found {saves}");
    Ok(())
}
