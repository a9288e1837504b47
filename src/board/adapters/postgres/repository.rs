//! `PostgreSQL` store implementation for boards and tasks.

use super::{
    models::{BoardRow, NewBoardRow, NewTaskRow, TaskLifecycleChangeset, TaskRow},
    schema::{boards, tasks},
};
use crate::auth::domain::{Identity, UserId};
use crate::board::{
    domain::{
        Assignee, Board, BoardId, BoardKind, BoardName, NewBoard, NewTask, PersistedBoardData,
        PersistedTaskData, Task, TaskId, TaskStatus, TaskTitle, apply_transition,
    },
    ports::{BoardStore, StatusUpdate, StoreError, StoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;
use mockable::Clock;
use std::sync::Arc;
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed board store.
///
/// Every query filters on the caller's account, so records owned by other
/// accounts are indistinguishable from missing ones.
pub struct PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    pool: BoardPgPool,
    clock: Arc<C>,
}

impl<C> Clone for PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StoreError::persistence)?
    }
}

impl From<DieselError> for StoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl<C> BoardStore for PostgresBoardStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_boards(&self, identity: &Identity) -> StoreResult<Vec<Board>> {
        let user_id = identity.user_id().into_inner();
        self.run_blocking(move |connection| {
            let rows = boards::table
                .filter(boards::user_id.eq(user_id))
                .order((boards::created_at.asc(), boards::seq.asc()))
                .select(BoardRow::as_select())
                .load::<BoardRow>(connection)?;
            rows.into_iter().map(row_to_board).collect()
        })
        .await
    }

    async fn create_board(&self, identity: &Identity, board: &NewBoard) -> StoreResult<Board> {
        let new_row = NewBoardRow {
            user_id: identity.user_id().into_inner(),
            name: board.name().as_str().to_owned(),
            icon: board.icon().to_owned(),
            color: board.color().to_owned(),
            created_at: self.clock.utc(),
        };
        let created = self
            .run_blocking(move |connection| {
                let row = diesel::insert_into(boards::table)
                    .values(&new_row)
                    .returning(BoardRow::as_returning())
                    .get_result::<BoardRow>(connection)?;
                row_to_board(row)
            })
            .await?;
        tracing::debug!(board_id = %created.id(), "stored board");
        Ok(created)
    }

    async fn delete_board(&self, identity: &Identity, id: BoardId) -> StoreResult<()> {
        let Some(board_uuid) = id.as_uuid() else {
            return Err(StoreError::BoardNotFound(id));
        };
        let user_id = identity.user_id().into_inner();
        // Tasks go with the board through the foreign key's ON DELETE CASCADE.
        let deleted = self
            .run_blocking(move |connection| {
                let count = diesel::delete(
                    boards::table
                        .filter(boards::id.eq(board_uuid))
                        .filter(boards::user_id.eq(user_id)),
                )
                .execute(connection)?;
                Ok(count)
            })
            .await?;
        if deleted == 0 {
            return Err(StoreError::BoardNotFound(id));
        }
        tracing::debug!(board_id = %id, "deleted board");
        Ok(())
    }

    async fn list_tasks(&self, identity: &Identity, board_id: BoardId) -> StoreResult<Vec<Task>> {
        if board_id.kind() == BoardKind::Default {
            return Ok(Vec::new());
        }
        let Some(board_uuid) = board_id.as_uuid() else {
            return Err(StoreError::BoardNotFound(board_id));
        };
        let user_id = identity.user_id().into_inner();
        self.run_blocking(move |connection| {
            if !owns_board(connection, board_uuid, user_id)? {
                return Err(StoreError::BoardNotFound(board_id));
            }
            let rows = tasks::table
                .filter(tasks::board_id.eq(board_uuid))
                .filter(tasks::user_id.eq(user_id))
                .order((tasks::created_at.asc(), tasks::seq.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn create_task(&self, identity: &Identity, task: &NewTask) -> StoreResult<Task> {
        let board_id = task.board_id();
        let Some(board_uuid) = board_id.as_uuid() else {
            return Err(StoreError::BoardNotFound(board_id));
        };
        if task.user_id() != identity.user_id() {
            return Err(StoreError::BoardNotFound(board_id));
        }
        let new_row = to_new_task_row(board_uuid, task);
        let created = self
            .run_blocking(move |connection| {
                connection.transaction::<_, StoreError, _>(|tx| {
                    if !owns_board(tx, board_uuid, new_row.user_id)? {
                        return Err(StoreError::BoardNotFound(board_id));
                    }
                    let row = diesel::insert_into(tasks::table)
                        .values(&new_row)
                        .returning(TaskRow::as_returning())
                        .get_result::<TaskRow>(tx)?;
                    row_to_task(row)
                })
            })
            .await?;
        tracing::debug!(task_id = %created.id(), board_id = %board_id, "stored task");
        Ok(created)
    }

    async fn update_task_status(
        &self,
        identity: &Identity,
        id: TaskId,
        update: StatusUpdate,
    ) -> StoreResult<Task> {
        let user_id = identity.user_id().into_inner();
        let now = update.at.unwrap_or_else(|| self.clock.utc());
        let updated = self
            .run_blocking(move |connection| {
                connection.transaction::<_, StoreError, _>(|tx| {
                    let row = tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .filter(tasks::user_id.eq(user_id))
                        .select(TaskRow::as_select())
                        .first::<TaskRow>(tx)
                        .optional()?
                        .ok_or(StoreError::TaskNotFound(id))?;
                    let next = apply_transition(&row_to_task(row)?, update.status, now)?;
                    let updated_row =
                        diesel::update(tasks::table.filter(tasks::id.eq(id.into_inner())))
                            .set(&to_lifecycle_changeset(&next))
                            .returning(TaskRow::as_returning())
                            .get_result::<TaskRow>(tx)?;
                    row_to_task(updated_row)
                })
            })
            .await?;
        tracing::debug!(task_id = %id, status = %update.status, "updated task status");
        Ok(updated)
    }

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> StoreResult<()> {
        let user_id = identity.user_id().into_inner();
        let deleted = self
            .run_blocking(move |connection| {
                let count = diesel::delete(
                    tasks::table
                        .filter(tasks::id.eq(id.into_inner()))
                        .filter(tasks::user_id.eq(user_id)),
                )
                .execute(connection)?;
                Ok(count)
            })
            .await?;
        if deleted == 0 {
            return Err(StoreError::TaskNotFound(id));
        }
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}

fn owns_board(connection: &mut PgConnection, board_id: Uuid, user_id: Uuid) -> StoreResult<bool> {
    let found = boards::table
        .filter(boards::id.eq(board_id))
        .filter(boards::user_id.eq(user_id))
        .select(boards::id)
        .first::<Uuid>(connection)
        .optional()?;
    Ok(found.is_some())
}

fn to_new_task_row(board_id: Uuid, task: &NewTask) -> NewTaskRow {
    NewTaskRow {
        board_id,
        user_id: task.user_id().into_inner(),
        title: task.title().as_str().to_owned(),
        status: TaskStatus::Todo.as_str().to_owned(),
        assignee: task.assignee().as_str().to_owned(),
        created_at: task.created_at(),
    }
}

fn to_lifecycle_changeset(task: &Task) -> TaskLifecycleChangeset {
    TaskLifecycleChangeset {
        status: task.status().as_str().to_owned(),
        started_at: task.started_at(),
        completed_at: task.completed_at(),
        duration: task.duration().map(str::to_owned),
    }
}

fn row_to_board(row: BoardRow) -> StoreResult<Board> {
    let BoardRow {
        id,
        user_id,
        name,
        icon,
        color,
        created_at,
    } = row;
    Ok(Board::from_persisted(PersistedBoardData {
        id,
        name: BoardName::new(name).map_err(StoreError::persistence)?,
        icon,
        color,
        user_id: UserId::from_uuid(user_id),
        created_at,
    }))
}

fn row_to_task(row: TaskRow) -> StoreResult<Task> {
    let TaskRow {
        id,
        board_id,
        user_id,
        title,
        status,
        assignee,
        created_at,
        started_at,
        completed_at,
        duration,
    } = row;
    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(StoreError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(StoreError::persistence)?,
        assignee: Assignee::new(assignee).map_err(StoreError::persistence)?,
        created_at,
        started_at,
        completed_at,
        duration,
        board_id: BoardId::persisted(board_id),
        user_id: UserId::from_uuid(user_id),
    };
    Ok(Task::from_persisted(data))
}
