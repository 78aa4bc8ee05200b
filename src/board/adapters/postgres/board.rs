//! `PostgreSQL` board adapter implementing the store-side duplication ports.

use super::{
    models::{self, NewSubtaskRow, SubtaskRow, TaskRow},
    schema::{board_columns, categories, project_users, subtasks, swimlanes, tasks},
};
use crate::board::{
    domain::{
        CategoryId, ColumnId, ProjectId, SubtaskStatus, SwimlaneId, TaskChanges, TaskDraft,
        TaskId, TaskRecord, UserId,
    },
    ports::{
        CategoryResolver, ColumnResolver, PermissionChecker, StoreError, StoreResult,
        SubtaskDuplicator, SwimlaneResolver, TaskCreator, TaskLookup, TaskUpdater,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store and resolver set.
///
/// Event dispatch stays outside this adapter; wire an event dispatcher port
/// implementation separately.
#[derive(Debug, Clone)]
pub struct PostgresBoard {
    pool: BoardPgPool,
}

impl PostgresBoard {
    /// Creates a new board adapter from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::backend)?
    }
}

fn count_in_column(
    connection: &mut PgConnection,
    project_id: ProjectId,
    column_id: ColumnId,
) -> StoreResult<i64> {
    tasks::table
        .filter(tasks::project_id.eq(project_id.value()))
        .filter(tasks::column_id.eq(column_id.value()))
        .count()
        .get_result::<i64>(connection)
        .map_err(StoreError::backend)
}

#[async_trait]
impl TaskLookup for PostgresBoard {
    async fn find_by_id(&self, id: TaskId) -> StoreResult<Option<TaskRecord>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            row.map(models::row_to_task).transpose()
        })
        .await
    }

    async fn count_by_column(
        &self,
        project_id: ProjectId,
        column_id: ColumnId,
    ) -> StoreResult<u32> {
        self.run_blocking(move |connection| {
            let count = count_in_column(connection, project_id, column_id)?;
            u32::try_from(count).map_err(StoreError::backend)
        })
        .await
    }
}

#[async_trait]
impl TaskCreator for PostgresBoard {
    async fn create(&self, draft: &TaskDraft) -> StoreResult<TaskId> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::Rejected("task title must not be empty".to_owned()));
        }
        let draft_values = draft.clone();
        self.run_blocking(move |connection| {
            let occupied = count_in_column(connection, draft_values.project_id, draft_values.column_id)?;
            let position = i32::try_from(occupied + 1).map_err(StoreError::backend)?;
            let new_row = models::draft_to_new_row(&draft_values, position);
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(StoreError::backend)?;
            Ok(TaskId::new(id))
        })
        .await
    }
}

#[async_trait]
impl TaskUpdater for PostgresBoard {
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> StoreResult<bool> {
        if *changes == TaskChanges::default() {
            return Ok(false);
        }
        let row = models::changes_to_row(changes)?;
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                .set(&row)
                .execute(connection)
                .map_err(StoreError::backend)?;
            Ok(affected > 0)
        })
        .await
    }
}

#[async_trait]
impl SubtaskDuplicator for PostgresBoard {
    async fn duplicate(&self, source: TaskId, destination: TaskId) -> StoreResult<()> {
        self.run_blocking(move |connection| {
            let originals = subtasks::table
                .filter(subtasks::task_id.eq(source.value()))
                .select(SubtaskRow::as_select())
                .load::<SubtaskRow>(connection)
                .map_err(StoreError::backend)?;

            let copies: Vec<NewSubtaskRow> = originals
                .into_iter()
                .map(|original| NewSubtaskRow {
                    task_id: destination.value(),
                    title: original.title,
                    assignee_id: original.assignee_id,
                    time_estimated: original.time_estimated,
                    status: SubtaskStatus::Todo.as_str().to_owned(),
                })
                .collect();
            if copies.is_empty() {
                return Ok(());
            }

            diesel::insert_into(subtasks::table)
                .values(&copies)
                .execute(connection)
                .map_err(StoreError::backend)?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl CategoryResolver for PostgresBoard {
    async fn name_by_id(&self, id: CategoryId) -> StoreResult<Option<String>> {
        self.run_blocking(move |connection| {
            categories::table
                .filter(categories::id.eq(id.value()))
                .select(categories::name)
                .first::<String>(connection)
                .optional()
                .map_err(StoreError::backend)
        })
        .await
    }

    async fn id_by_name(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> StoreResult<Option<CategoryId>> {
        let lookup_name = name.to_owned();
        self.run_blocking(move |connection| {
            let id = categories::table
                .filter(categories::project_id.eq(project_id.value()))
                .filter(categories::name.eq(lookup_name))
                .select(categories::id)
                .first::<i64>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            Ok(id.map(CategoryId::new))
        })
        .await
    }
}

#[async_trait]
impl SwimlaneResolver for PostgresBoard {
    async fn name_by_id(&self, id: SwimlaneId) -> StoreResult<Option<String>> {
        self.run_blocking(move |connection| {
            swimlanes::table
                .filter(swimlanes::id.eq(id.value()))
                .select(swimlanes::name)
                .first::<String>(connection)
                .optional()
                .map_err(StoreError::backend)
        })
        .await
    }

    async fn id_by_name(
        &self,
        project_id: ProjectId,
        name: &str,
    ) -> StoreResult<Option<SwimlaneId>> {
        let lookup_name = name.to_owned();
        self.run_blocking(move |connection| {
            let id = swimlanes::table
                .filter(swimlanes::project_id.eq(project_id.value()))
                .filter(swimlanes::name.eq(lookup_name))
                .select(swimlanes::id)
                .first::<i64>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            Ok(id.map(SwimlaneId::new))
        })
        .await
    }
}

#[async_trait]
impl ColumnResolver for PostgresBoard {
    async fn title_by_id(&self, id: ColumnId) -> StoreResult<Option<String>> {
        self.run_blocking(move |connection| {
            board_columns::table
                .filter(board_columns::id.eq(id.value()))
                .select(board_columns::title)
                .first::<String>(connection)
                .optional()
                .map_err(StoreError::backend)
        })
        .await
    }

    async fn id_by_title(
        &self,
        project_id: ProjectId,
        title: &str,
    ) -> StoreResult<Option<ColumnId>> {
        let lookup_title = title.to_owned();
        self.run_blocking(move |connection| {
            let id = board_columns::table
                .filter(board_columns::project_id.eq(project_id.value()))
                .filter(board_columns::title.eq(lookup_title))
                .select(board_columns::id)
                .first::<i64>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            Ok(id.map(ColumnId::new))
        })
        .await
    }

    async fn first_column_id(&self, project_id: ProjectId) -> StoreResult<ColumnId> {
        self.run_blocking(move |connection| {
            let id = board_columns::table
                .filter(board_columns::project_id.eq(project_id.value()))
                .order(board_columns::position.asc())
                .select(board_columns::id)
                .first::<i64>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            id.map(ColumnId::new).ok_or(StoreError::NoColumns(project_id))
        })
        .await
    }
}

#[async_trait]
impl PermissionChecker for PostgresBoard {
    async fn is_user_allowed(&self, project_id: ProjectId, user_id: UserId) -> StoreResult<bool> {
        self.run_blocking(move |connection| {
            let membership = project_users::table
                .filter(project_users::project_id.eq(project_id.value()))
                .filter(project_users::user_id.eq(user_id.value()))
                .select(project_users::user_id)
                .first::<i64>(connection)
                .optional()
                .map_err(StoreError::backend)?;
            Ok(membership.is_some())
        })
        .await
    }
}
