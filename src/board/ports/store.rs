//! Store port for boards and tasks, scoped by caller identity.

use crate::auth::domain::Identity;
use crate::board::domain::{
    Board, BoardId, NewBoard, NewTask, Task, TaskDomainError, TaskId, TaskStatus,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Requested status change for a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Target status.
    pub status: TaskStatus,
    /// Instant of the move. The store's clock is used when absent.
    pub at: Option<DateTime<Utc>>,
}

impl StatusUpdate {
    /// Creates an update stamped by the store's clock.
    #[must_use]
    pub const fn new(status: TaskStatus) -> Self {
        Self { status, at: None }
    }

    /// Creates an update stamped at a caller-supplied instant.
    #[must_use]
    pub const fn at(status: TaskStatus, at: DateTime<Utc>) -> Self {
        Self {
            status,
            at: Some(at),
        }
    }
}

/// Board and task persistence contract.
///
/// Every operation is scoped to `identity`: records owned by another account
/// behave as if they do not exist. Default boards are never stored.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Returns the caller's boards ordered by creation time, each with an
    /// empty task collection.
    async fn list_boards(&self, identity: &Identity) -> StoreResult<Vec<Board>>;

    /// Creates a board owned by the caller.
    async fn create_board(&self, identity: &Identity, board: &NewBoard) -> StoreResult<Board>;

    /// Deletes a board and its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BoardNotFound`] when the board is absent or owned
    /// by another account.
    async fn delete_board(&self, identity: &Identity, id: BoardId) -> StoreResult<()>;

    /// Returns a board's tasks ordered by creation time.
    ///
    /// Default boards yield an empty list without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BoardNotFound`] when a persisted board is absent
    /// or owned by another account.
    async fn list_tasks(&self, identity: &Identity, board_id: BoardId) -> StoreResult<Vec<Task>>;

    /// Inserts a task, assigning its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BoardNotFound`] when the target board is absent,
    /// not stored, or owned by another account.
    async fn create_task(&self, identity: &Identity, task: &NewTask) -> StoreResult<Task>;

    /// Moves a task to a new status, deriving its timestamps and duration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the task is absent or owned
    /// by another account.
    async fn update_task_status(
        &self,
        identity: &Identity,
        id: TaskId,
        update: StatusUpdate,
    ) -> StoreResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] when the task is absent or owned
    /// by another account.
    async fn delete_task(&self, identity: &Identity, id: TaskId) -> StoreResult<()>;
}

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The board does not exist for the caller.
    #[error("board not found or does not belong to user: {0}")]
    BoardNotFound(BoardId),

    /// The task does not exist for the caller.
    #[error("task not found or does not belong to user: {0}")]
    TaskNotFound(TaskId),

    /// A record failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
