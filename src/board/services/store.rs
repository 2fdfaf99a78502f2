//! The board store: owner of all board state and the only mutation path.
//!
//! Every operation runs to completion synchronously. A mutation derives new
//! entity tables, commits them as the next [`BoardSnapshot`], and then
//! notifies subscribers with the committed snapshot. Operations that
//! reference unknown ids are silent no-ops. Operations that would break a
//! referential invariant leave the tables untouched and record the failure
//! in the error slot.

use super::drag::{DragEvent, DragState, Reconciliation, reconcile};
use crate::board::{
    config::BoardConfig,
    domain::{
        BoardError, BoardSnapshot, BoardTables, Column, ColumnId, ConstraintViolation, Developer,
        DeveloperDirectory, ErrorKind, NewProject, NewTask, Project, ProjectId, ProjectPatch,
        SnapshotBuilder, Task, TaskId, TaskPatch,
    },
    ports::{BoardSubscriber, SubscriptionId},
};
use mockable::Clock;
use std::sync::Arc;

/// Board state container.
pub struct BoardStore<C>
where
    C: Clock + Send + Sync,
{
    snapshot: BoardSnapshot,
    config: BoardConfig,
    developers: DeveloperDirectory,
    clock: Arc<C>,
    subscribers: Vec<(SubscriptionId, Arc<dyn BoardSubscriber>)>,
    next_subscription: u64,
}

impl<C> BoardStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store with the default configuration and developer
    /// directory.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            snapshot: BoardSnapshot::default(),
            config: BoardConfig::default(),
            developers: DeveloperDirectory::default(),
            clock,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the store configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the developer directory used to resolve assignees.
    #[must_use]
    pub fn with_developers(mut self, developers: DeveloperDirectory) -> Self {
        self.developers = developers;
        self
    }

    /// Seeds the store with previously persisted tables.
    ///
    /// No project is selected afterwards.
    #[must_use]
    pub fn with_tables(mut self, tables: BoardTables) -> Self {
        self.snapshot = BoardSnapshot::from_tables(tables);
        self
    }

    // ── Lookups ────────────────────────────────────────────────────────

    /// Returns the current committed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        self.snapshot.clone()
    }

    /// Returns the store configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns all projects.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        self.snapshot.projects()
    }

    /// Looks up a project.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.snapshot.project(id)
    }

    /// Returns the selected project, if any.
    #[must_use]
    pub const fn active_project(&self) -> Option<&Project> {
        self.snapshot.active_project()
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.snapshot.column(id)
    }

    /// Returns the project's columns sorted by board position.
    #[must_use]
    pub fn columns_for(&self, project: ProjectId) -> Vec<&Column> {
        self.snapshot.columns_for(project)
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.snapshot.task(id)
    }

    /// Returns the project's tasks in table order.
    #[must_use]
    pub fn tasks_for(&self, project: ProjectId) -> Vec<&Task> {
        self.snapshot.tasks_for(project)
    }

    /// Returns the tasks placed in a column, in table order.
    #[must_use]
    pub fn tasks_in_column(&self, column: ColumnId) -> Vec<&Task> {
        self.snapshot.tasks_in_column(column)
    }

    /// Resolves the developer assigned to a task.
    #[must_use]
    pub fn assignee_of(&self, task: TaskId) -> Option<&Developer> {
        let assignee = self.snapshot.task(task)?.assignee()?;
        self.developers.resolve(assignee)
    }

    /// Returns the developer directory.
    #[must_use]
    pub const fn developers(&self) -> &DeveloperDirectory {
        &self.developers
    }

    /// Returns the last operation failure, if any.
    #[must_use]
    pub const fn last_error(&self) -> Option<&BoardError> {
        self.snapshot.error()
    }

    // ── Subscriptions ──────────────────────────────────────────────────

    /// Registers an observer for committed snapshots.
    pub fn subscribe(&mut self, subscriber: Arc<dyn BoardSubscriber>) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Removes an observer. Returns `false` when the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(registered, _)| *registered != id);
        self.subscribers.len() != before
    }

    // ── Projects ───────────────────────────────────────────────────────

    /// Selects a project, or clears the selection when the id is unknown.
    pub fn set_active_project(&mut self, id: ProjectId) {
        let selected = self.snapshot.project(id).cloned();
        if selected.as_ref() == self.snapshot.active_project() {
            return;
        }
        let next = self.snapshot.next().active_project(selected).build();
        self.commit("set_active_project", next);
    }

    /// Creates a project together with its default columns and selects it.
    pub fn create_project(&mut self, data: NewProject) -> ProjectId {
        let project = Project::new(data, &*self.clock);
        let project_id = project.id();

        let mut projects = self.snapshot.projects().to_vec();
        projects.push(project.clone());
        let mut columns = self.snapshot.columns().to_vec();
        columns.extend(
            (0_u32..)
                .zip(&self.config.default_columns)
                .map(|(order, name)| Column::new(project_id, name.as_str(), order)),
        );

        let next = self
            .snapshot
            .next()
            .projects(projects)
            .columns(columns)
            .active_project(Some(project))
            .build();
        self.commit("create_project", next);
        project_id
    }

    /// Merges a patch into a project and refreshes its `updated_at`.
    ///
    /// The selection is refreshed in the same transition when the project is
    /// active.
    pub fn update_project(&mut self, id: ProjectId, patch: &ProjectPatch) {
        let Some(current) = self.snapshot.project(id) else {
            tracing::debug!(project = %id, "update_project ignored: unknown project");
            return;
        };
        let updated = current.patched(patch, &*self.clock);
        let projects = self
            .snapshot
            .projects()
            .iter()
            .map(|project| {
                if project.id() == id {
                    updated.clone()
                } else {
                    project.clone()
                }
            })
            .collect();

        let mut next = self.snapshot.next().projects(projects);
        if self.is_active(id) {
            next = next.active_project(Some(updated));
        }
        let snapshot = next.build();
        self.commit("update_project", snapshot);
    }

    /// Removes a project with all of its columns and tasks.
    pub fn delete_project(&mut self, id: ProjectId) {
        if self.snapshot.project(id).is_none() {
            tracing::debug!(project = %id, "delete_project ignored: unknown project");
            return;
        }
        let projects = self
            .snapshot
            .projects()
            .iter()
            .filter(|project| project.id() != id)
            .cloned()
            .collect();
        let columns = self
            .snapshot
            .columns()
            .iter()
            .filter(|column| column.project_id() != id)
            .cloned()
            .collect();
        let tasks = self
            .snapshot
            .tasks()
            .iter()
            .filter(|task| task.project_id() != id)
            .cloned()
            .collect();

        let mut next = self
            .snapshot
            .next()
            .projects(projects)
            .columns(columns)
            .tasks(tasks);
        if self.is_active(id) {
            next = next.active_project(None);
        }
        let snapshot = next.build();
        self.commit("delete_project", snapshot);
    }

    // ── Columns ────────────────────────────────────────────────────────

    /// Appends a column after the project's right-most column.
    ///
    /// Returns `None` when the project is unknown.
    pub fn create_column(
        &mut self,
        project: ProjectId,
        name: impl Into<String>,
    ) -> Option<ColumnId> {
        if self.snapshot.project(project).is_none() {
            tracing::debug!(%project, "create_column ignored: unknown project");
            return None;
        }
        let order = self
            .snapshot
            .columns()
            .iter()
            .filter(|column| column.project_id() == project)
            .map(Column::order)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let column = Column::new(project, name, order);
        let column_id = column.id();

        let mut columns = self.snapshot.columns().to_vec();
        columns.push(column);
        let next = self.snapshot.next().columns(columns).build();
        self.commit("create_column", next);
        Some(column_id)
    }

    /// Renames a column in place.
    pub fn update_column(&mut self, id: ColumnId, name: impl Into<String>) {
        let Some(current) = self.snapshot.column(id) else {
            tracing::debug!(column = %id, "update_column ignored: unknown column");
            return;
        };
        let renamed = current.renamed(name);
        let columns = self
            .snapshot
            .columns()
            .iter()
            .map(|column| {
                if column.id() == id {
                    renamed.clone()
                } else {
                    column.clone()
                }
            })
            .collect();
        let next = self.snapshot.next().columns(columns).build();
        self.commit("update_column", next);
    }

    /// Deletes a column that no task references.
    ///
    /// Success clears the error slot.
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintViolation::ColumnHasTasks`] (also recorded in the
    /// error slot) when tasks still reference the column; the tables are left
    /// unchanged.
    pub fn delete_column(&mut self, id: ColumnId) -> Result<(), BoardError> {
        let task_count = self.snapshot.tasks_in_column(id).len();
        if task_count > 0 {
            return Err(self.refuse(
                "delete_column",
                ConstraintViolation::ColumnHasTasks {
                    column: id,
                    task_count,
                }
                .into(),
            ));
        }

        let mut next = self.snapshot.next();
        if self.snapshot.column(id).is_some() {
            let columns = self
                .snapshot
                .columns()
                .iter()
                .filter(|column| column.id() != id)
                .cloned()
                .collect();
            next = next.columns(columns);
        } else if self.snapshot.error().is_none() {
            tracing::debug!(column = %id, "delete_column ignored: unknown column");
            return Ok(());
        }
        let snapshot = next.error(None).build();
        self.commit("delete_column", snapshot);
        Ok(())
    }

    /// Sets each listed column's order to its index in `ordered`.
    ///
    /// Only columns of `project` are touched. Columns of the project that are
    /// missing from `ordered` keep their previous order, even when that
    /// collides with a newly assigned one. Ids of other projects are ignored.
    pub fn reorder_columns(&mut self, project: ProjectId, ordered: &[ColumnId]) {
        let mut changed = false;
        let columns = self
            .snapshot
            .columns()
            .iter()
            .map(|column| {
                let new_order = (column.project_id() == project)
                    .then(|| ordered.iter().position(|id| *id == column.id()))
                    .flatten()
                    .and_then(|index| u32::try_from(index).ok())
                    .filter(|order| *order != column.order());
                match new_order {
                    Some(order) => {
                        changed = true;
                        column.reordered(order)
                    }
                    None => column.clone(),
                }
            })
            .collect();

        if !changed {
            tracing::debug!(%project, "reorder_columns left every column in place");
            return;
        }
        let next = self.snapshot.next().columns(columns).build();
        self.commit("reorder_columns", next);
    }

    // ── Tasks ──────────────────────────────────────────────────────────

    /// Creates a task in a column of its project.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] (also recorded in the error slot)
    /// when the column does not exist or belongs to another project.
    pub fn create_task(&mut self, data: NewTask) -> Result<TaskId, BoardError> {
        if let Err(err) = self.check_placement(data.project_id(), data.column_id()) {
            return Err(self.refuse("create_task", err));
        }
        let task = Task::new(data, &*self.clock);
        let task_id = task.id();

        let mut tasks = self.snapshot.tasks().to_vec();
        tasks.push(task);
        let next = self
            .clearing(ErrorKind::TaskPlacement)
            .tasks(tasks)
            .build();
        self.commit("create_task", next);
        Ok(task_id)
    }

    /// Merges a patch into a task and refreshes its `updated_at`.
    ///
    /// Unknown task ids are ignored, as are patches that only restate the
    /// task's current placement, matching [`BoardStore::move_task`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] (also recorded in the error slot)
    /// when the patch places the task in a column that does not exist or
    /// belongs to another project.
    pub fn update_task(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), BoardError> {
        let Some(current) = self.snapshot.task(id) else {
            tracing::debug!(task = %id, "update_task ignored: unknown task");
            return Ok(());
        };
        if patch.touches_only_placement()
            && current.placement_after(patch) == (current.project_id(), current.column_id())
        {
            tracing::debug!(task = %id, "update_task ignored: placement unchanged");
            return Ok(());
        }
        if patch.changes_placement() {
            let (project, column) = current.placement_after(patch);
            if let Err(err) = self.check_placement(project, column) {
                return Err(self.refuse("update_task", err));
            }
        }
        let updated = current.patched(patch, &*self.clock);

        let next = if patch.changes_placement() {
            self.clearing(ErrorKind::TaskPlacement)
        } else {
            self.snapshot.next()
        };
        let snapshot = next.tasks(self.tasks_with(updated)).build();
        self.commit("update_task", snapshot);
        Ok(())
    }

    /// Removes a task.
    pub fn delete_task(&mut self, id: TaskId) {
        if self.snapshot.task(id).is_none() {
            tracing::debug!(task = %id, "delete_task ignored: unknown task");
            return;
        }
        let tasks = self
            .snapshot
            .tasks()
            .iter()
            .filter(|task| task.id() != id)
            .cloned()
            .collect();
        let next = self.snapshot.next().tasks(tasks).build();
        self.commit("delete_task", next);
    }

    /// Places a task in another column and refreshes its `updated_at`.
    ///
    /// Moving a task into the column it already occupies, or moving an
    /// unknown task, changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintViolation`] (also recorded in the error slot)
    /// when the destination does not exist or belongs to another project.
    pub fn move_task(&mut self, id: TaskId, destination: ColumnId) -> Result<(), BoardError> {
        let Some(current) = self.snapshot.task(id) else {
            tracing::debug!(task = %id, "move_task ignored: unknown task");
            return Ok(());
        };
        if current.column_id() == destination {
            return Ok(());
        }
        if let Err(err) = self.check_placement(current.project_id(), destination) {
            return Err(self.refuse("move_task", err));
        }
        let moved = current.moved_to(destination, &*self.clock);

        let next = self
            .clearing(ErrorKind::TaskPlacement)
            .tasks(self.tasks_with(moved))
            .build();
        self.commit("move_task", next);
        Ok(())
    }

    // ── Drag and drop ──────────────────────────────────────────────────

    /// Applies a drag gesture event and returns the next drag state.
    ///
    /// Refused moves are recorded in the error slot like any other move.
    pub fn handle_drag(&mut self, state: &DragState, event: &DragEvent) -> DragState {
        let Reconciliation {
            state: next_state,
            command,
        } = reconcile(
            &self.snapshot,
            state,
            event,
            &self.config.column_target_prefix,
        );
        if let Some(command) = command
            && let Err(err) = self.move_task(command.task, command.destination)
        {
            tracing::debug!(task = %command.task, error = %err, "drag move refused");
        }
        next_state
    }

    // ── Error slot ─────────────────────────────────────────────────────

    /// Clears the error slot.
    pub fn clear_error(&mut self) {
        if self.snapshot.error().is_none() {
            return;
        }
        let next = self.snapshot.next().error(None).build();
        self.commit("clear_error", next);
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn is_active(&self, id: ProjectId) -> bool {
        self.snapshot
            .active_project()
            .is_some_and(|project| project.id() == id)
    }

    fn check_placement(&self, project: ProjectId, column: ColumnId) -> Result<(), BoardError> {
        let Some(found) = self.snapshot.column(column) else {
            return Err(ConstraintViolation::UnknownColumn { column }.into());
        };
        if found.project_id() != project {
            return Err(ConstraintViolation::ColumnNotInProject { column, project }.into());
        }
        Ok(())
    }

    fn tasks_with(&self, updated: Task) -> Vec<Task> {
        self.snapshot
            .tasks()
            .iter()
            .map(|task| {
                if task.id() == updated.id() {
                    updated.clone()
                } else {
                    task.clone()
                }
            })
            .collect()
    }

    /// Starts the next snapshot, clearing the error slot when it holds an
    /// error of `kind`.
    fn clearing(&self, kind: ErrorKind) -> SnapshotBuilder<'_> {
        let next = self.snapshot.next();
        if self.snapshot.error().is_some_and(|err| err.kind() == kind) {
            next.error(None)
        } else {
            next
        }
    }

    fn refuse(&mut self, operation: &'static str, error: BoardError) -> BoardError {
        tracing::warn!(operation, error = %error, "board operation refused");
        let next = self.snapshot.next().error(Some(error.clone())).build();
        self.commit(operation, next);
        error
    }

    fn commit(&mut self, operation: &'static str, next: BoardSnapshot) {
        self.snapshot = next;
        tracing::debug!(
            operation,
            version = self.snapshot.version(),
            projects = self.snapshot.projects().len(),
            columns = self.snapshot.columns().len(),
            tasks = self.snapshot.tasks().len(),
            "committed board transition"
        );
        for (_, subscriber) in &self.subscribers {
            subscriber.on_commit(&self.snapshot);
        }
    }
}
