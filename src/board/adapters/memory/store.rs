//! In-memory board store.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::auth::domain::Identity;
use crate::board::{
    domain::{
        Board, BoardId, BoardKind, NewBoard, NewTask, PersistedBoardData, Task, TaskId,
        apply_transition,
    },
    ports::{BoardStore, StatusUpdate, StoreError, StoreResult},
};

/// Thread-safe in-memory board store.
///
/// Records are kept in insertion order and returned sorted by creation time.
pub struct InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryBoardState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: Vec<Board>,
    tasks: Vec<Task>,
    offline: bool,
}

impl InMemoryBoardState {
    fn owns_board(&self, identity: &Identity, id: BoardId) -> bool {
        self.boards
            .iter()
            .any(|board| board.id() == id && board.user_id() == Some(identity.user_id()))
    }

    fn owned_task(&self, identity: &Identity, id: TaskId) -> StoreResult<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id() == id && task.user_id() == identity.user_id())
            .ok_or(StoreError::TaskNotFound(id))
    }
}

impl<C> Clone for InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState::default())),
            clock,
        }
    }

    /// Simulates an unreachable backend: while offline every operation fails
    /// with [`StoreError::Persistence`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the state lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> StoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        state.offline = offline;
        Ok(())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        let state = self
            .state
            .read()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        ensure_online(&state)?;
        Ok(state)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        let state = self
            .state
            .write()
            .map_err(|err| StoreError::persistence(std::io::Error::other(err.to_string())))?;
        ensure_online(&state)?;
        Ok(state)
    }
}

fn ensure_online(state: &InMemoryBoardState) -> StoreResult<()> {
    if state.offline {
        return Err(StoreError::persistence(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "board store is offline",
        )));
    }
    Ok(())
}

#[async_trait]
impl<C> BoardStore for InMemoryBoardStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list_boards(&self, identity: &Identity) -> StoreResult<Vec<Board>> {
        let state = self.read()?;
        let mut boards: Vec<Board> = state
            .boards
            .iter()
            .filter(|board| board.user_id() == Some(identity.user_id()))
            .cloned()
            .collect();
        boards.sort_by_key(Board::created_at);
        Ok(boards)
    }

    async fn create_board(&self, identity: &Identity, board: &NewBoard) -> StoreResult<Board> {
        let mut state = self.write()?;
        let created = Board::from_persisted(PersistedBoardData {
            id: Uuid::new_v4(),
            name: board.name().clone(),
            icon: board.icon().to_owned(),
            color: board.color().to_owned(),
            user_id: identity.user_id(),
            created_at: self.clock.utc(),
        });
        state.boards.push(created.clone());
        tracing::debug!(board_id = %created.id(), user_id = %identity.user_id(), "stored board");
        Ok(created)
    }

    async fn delete_board(&self, identity: &Identity, id: BoardId) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.owns_board(identity, id) {
            return Err(StoreError::BoardNotFound(id));
        }
        state.boards.retain(|board| board.id() != id);
        state.tasks.retain(|task| task.board_id() != id);
        tracing::debug!(board_id = %id, "deleted board and its tasks");
        Ok(())
    }

    async fn list_tasks(&self, identity: &Identity, board_id: BoardId) -> StoreResult<Vec<Task>> {
        if board_id.kind() == BoardKind::Default {
            return Ok(Vec::new());
        }
        let state = self.read()?;
        if !state.owns_board(identity, board_id) {
            return Err(StoreError::BoardNotFound(board_id));
        }
        let mut tasks: Vec<Task> = state
            .tasks
            .iter()
            .filter(|task| task.board_id() == board_id && task.user_id() == identity.user_id())
            .cloned()
            .collect();
        tasks.sort_by_key(Task::created_at);
        Ok(tasks)
    }

    async fn create_task(&self, identity: &Identity, task: &NewTask) -> StoreResult<Task> {
        let mut state = self.write()?;
        let board_id = task.board_id();
        if task.user_id() != identity.user_id() || !state.owns_board(identity, board_id) {
            return Err(StoreError::BoardNotFound(board_id));
        }
        let created = task.clone().into_task(TaskId::new());
        state.tasks.push(created.clone());
        tracing::debug!(task_id = %created.id(), board_id = %board_id, "stored task");
        Ok(created)
    }

    async fn update_task_status(
        &self,
        identity: &Identity,
        id: TaskId,
        update: StatusUpdate,
    ) -> StoreResult<Task> {
        let mut state = self.write()?;
        let now = update.at.unwrap_or_else(|| self.clock.utc());
        let updated = apply_transition(state.owned_task(identity, id)?, update.status, now)?;
        if let Some(slot) = state.tasks.iter_mut().find(|task| task.id() == id) {
            *slot = updated.clone();
        }
        tracing::debug!(task_id = %id, status = %update.status, "updated task status");
        Ok(updated)
    }

    async fn delete_task(&self, identity: &Identity, id: TaskId) -> StoreResult<()> {
        let mut state = self.write()?;
        state.owned_task(identity, id)?;
        state.tasks.retain(|task| task.id() != id);
        tracing::debug!(task_id = %id, "deleted task");
        Ok(())
    }
}
