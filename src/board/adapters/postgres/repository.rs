//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{ColumnRow, ProjectRow, TaskRow, sequence},
    schema::{board_columns, projects, tasks},
};
use crate::board::{
    domain::{BoardSnapshot, BoardTables, Column, Project, Task},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board repository.
///
/// A save replaces the stored board inside one transaction, so readers see
/// either the previous board or the new one. Every row stores its table
/// position in `seq` and a load returns rows in that order.
#[derive(Debug, Clone)]
pub struct PostgresBoardRepository {
    pool: BoardPgPool,
}

impl PostgresBoardRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(BoardRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for PostgresBoardRepository {
    async fn save(&self, snapshot: &BoardSnapshot) -> BoardRepositoryResult<()> {
        let project_rows = snapshot
            .projects()
            .iter()
            .enumerate()
            .map(|(index, project)| Ok(ProjectRow::new(sequence(index)?, project)))
            .collect::<BoardRepositoryResult<Vec<_>>>()?;
        let column_rows = snapshot
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| ColumnRow::new(sequence(index)?, column))
            .collect::<BoardRepositoryResult<Vec<_>>>()?;
        let task_rows = snapshot
            .tasks()
            .iter()
            .enumerate()
            .map(|(index, task)| Ok(TaskRow::new(sequence(index)?, task)))
            .collect::<BoardRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    // Children first on delete, parents first on insert.
                    diesel::delete(tasks::table).execute(tx)?;
                    diesel::delete(board_columns::table).execute(tx)?;
                    diesel::delete(projects::table).execute(tx)?;

                    if !project_rows.is_empty() {
                        diesel::insert_into(projects::table)
                            .values(&project_rows)
                            .execute(tx)?;
                    }
                    if !column_rows.is_empty() {
                        diesel::insert_into(board_columns::table)
                            .values(&column_rows)
                            .execute(tx)?;
                    }
                    if !task_rows.is_empty() {
                        diesel::insert_into(tasks::table)
                            .values(&task_rows)
                            .execute(tx)?;
                    }
                    Ok(())
                })
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }

    async fn load(&self) -> BoardRepositoryResult<BoardTables> {
        self.run_blocking(|connection| {
            let project_rows = projects::table
                .order(projects::seq.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            let column_rows = board_columns::table
                .order(board_columns::seq.asc())
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            let task_rows = tasks::table
                .order(tasks::seq.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;

            Ok(BoardTables {
                projects: project_rows.into_iter().map(Project::from).collect(),
                columns: column_rows
                    .into_iter()
                    .map(Column::try_from)
                    .collect::<BoardRepositoryResult<_>>()?,
                tasks: task_rows
                    .into_iter()
                    .map(Task::try_from)
                    .collect::<BoardRepositoryResult<_>>()?,
            })
        })
        .await
    }
}
