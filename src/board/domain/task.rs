//! Task aggregate and creation payloads.

use super::{Assignee, BoardId, TaskDomainError, TaskId, TaskStatus, TaskTitle, compute_duration};
use crate::auth::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    status: TaskStatus,
    assignee: Assignee,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    duration: Option<String>,
    board_id: BoardId,
    user_id: UserId,
}

/// Parameter object for reconstructing a stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: TaskTitle,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored assignee label.
    pub assignee: Assignee,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First entry into `inProgress`, if any.
    pub started_at: Option<DateTime<Utc>>,
    /// Latest entry into `done`, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rendered duration, if any.
    pub duration: Option<String>,
    /// Owning board.
    pub board_id: BoardId,
    /// Owning account.
    pub user_id: UserId,
}

/// Fields of a task that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    board_id: BoardId,
    user_id: UserId,
    title: TaskTitle,
    assignee: Assignee,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a new task payload in the `todo` column.
    #[must_use]
    pub const fn new(
        board_id: BoardId,
        user_id: UserId,
        title: TaskTitle,
        assignee: Assignee,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            board_id,
            user_id,
            title,
            assignee,
            created_at,
        }
    }

    /// Returns the target board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Materializes the task under the given identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            status: TaskStatus::Todo,
            assignee: self.assignee,
            created_at: self.created_at,
            started_at: None,
            completed_at: None,
            duration: None,
            board_id: self.board_id,
            user_id: self.user_id,
        }
    }
}

impl Task {
    /// Reconstructs a task from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            status: data.status,
            assignee: data.assignee,
            created_at: data.created_at,
            started_at: data.started_at,
            completed_at: data.completed_at,
            duration: data.duration,
            board_id: data.board_id,
            user_id: data.user_id,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the task first entered `inProgress`.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task last entered `done`.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the rendered duration between start and completion.
    #[must_use]
    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    /// Returns the owning board.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the owning account.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Moves the task to `target`, stamping timestamps as of `now`.
    ///
    /// Entering `inProgress` records `started_at` only the first time.
    /// Entering `done` records `completed_at` and, when the task has been
    /// started, the duration since `started_at`. Other moves change only the
    /// status. The task is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeSpan`] when completing at an
    /// instant earlier than `started_at`.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TaskDomainError> {
        match target {
            TaskStatus::InProgress => {
                if self.started_at.is_none() {
                    self.started_at = Some(now);
                }
            }
            TaskStatus::Done => {
                let duration = self
                    .started_at
                    .map(|started_at| compute_duration(started_at, now))
                    .transpose()?;
                self.completed_at = Some(now);
                self.duration = duration;
            }
            TaskStatus::Todo => {}
        }
        self.status = target;
        Ok(())
    }
}
