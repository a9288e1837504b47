//! Board collection manager: the session's authoritative board state.
//!
//! [`BoardCollection`] owns the boards of one session, the active board and
//! pending form input. Mutations on default boards apply to local state only;
//! mutations on persisted boards go through the [`BoardStore`] first and the
//! returned record replaces the local copy. A failed operation leaves the
//! collection exactly as it was and becomes the current error message.

use super::{BOOTSTRAP_BOARD_COUNT, BoardConfig, BoardDraft, BoardError, BoardResult, TaskDraft};
use crate::auth::{
    domain::{AuthError, Identity},
    ports::IdentityProvider,
};
use crate::board::{
    domain::{
        Assignee, Board, BoardColorClasses, BoardId, BoardKind, BoardName,
        DefaultBoard, NewBoard, NewTask, Task, TaskGroups, TaskId, TaskStatus, TaskTitle,
        apply_transition, resolve_color_classes,
    },
    ports::{BoardStore, StatusUpdate},
};
use mockable::Clock;
use std::sync::Arc;

const DEFAULT_BOARDS: [DefaultBoard; BOOTSTRAP_BOARD_COUNT] = [DefaultBoard::Personal, DefaultBoard::Work];

/// Session-scoped board and task state.
pub struct BoardCollection<S, P, C>
where
    S: BoardStore,
    P: IdentityProvider,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    identity: Arc<P>,
    clock: Arc<C>,
    config: BoardConfig,
    boards: Vec<Board>,
    active: Option<BoardId>,
    task_draft: TaskDraft,
    board_draft: BoardDraft,
    loading: bool,
    error: Option<String>,
}

impl<S, P, C> BoardCollection<S, P, C>
where
    S: BoardStore,
    P: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a session holding only the default boards, with the first one
    /// active. Nothing is fetched until [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BootstrapBoards`] unless the configuration has
    /// one template per default board, or [`BoardError::Domain`] when a
    /// template has an empty name.
    pub fn new(
        store: Arc<S>,
        identity: Arc<P>,
        clock: Arc<C>,
        config: BoardConfig,
    ) -> BoardResult<Self> {
        config.validate()?;
        let now = clock.utc();
        let boards = DEFAULT_BOARDS
            .iter()
            .zip(&config.bootstrap_boards)
            .map(|(board, template)| -> BoardResult<Board> {
                let name = BoardName::new(template.name.clone())?;
                let blueprint = NewBoard::new(name, template.icon.clone(), template.color.clone());
                Ok(Board::new_default(*board, blueprint, now))
            })
            .collect::<BoardResult<Vec<_>>>()?;
        let board_draft =
            BoardDraft::new(config.default_icon.clone(), config.default_color.clone());

        Ok(Self {
            active: boards.first().map(Board::id),
            store,
            identity,
            clock,
            config,
            boards,
            task_draft: TaskDraft::default(),
            board_draft,
            loading: true,
            error: None,
        })
    }

    /// Returns every board in the session.
    #[must_use]
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Returns the active board identifier.
    #[must_use]
    pub const fn active_board_id(&self) -> Option<BoardId> {
        self.active
    }

    /// Returns the active board.
    #[must_use]
    pub fn active_board(&self) -> Option<&Board> {
        self.active.and_then(|id| self.board(id))
    }

    /// Finds a board in the session.
    #[must_use]
    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id() == id)
    }

    /// Returns `true` when the personal board is active.
    #[must_use]
    pub fn is_personal_active(&self) -> bool {
        self.active.is_some_and(BoardId::is_personal)
    }

    /// Returns the active board's tasks split by status.
    #[must_use]
    pub fn task_groups(&self) -> TaskGroups<'_> {
        self.active_board()
            .map(Board::task_groups)
            .unwrap_or_default()
    }

    /// Returns the distinct assignees on the active board.
    #[must_use]
    pub fn assignees(&self) -> Vec<&str> {
        self.active_board()
            .map(Board::assignees)
            .unwrap_or_default()
    }

    /// Returns the display classes of the active board's color.
    #[must_use]
    pub fn active_color_classes(&self) -> BoardColorClasses {
        resolve_color_classes(self.active_board().map_or("", Board::color))
    }

    /// Returns `true` until the initial load completes or fails.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the message of the most recent failed operation, cleared by
    /// the next successful one.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the pending new-task input.
    #[must_use]
    pub const fn task_draft(&self) -> &TaskDraft {
        &self.task_draft
    }

    /// Returns the pending new-task input for editing.
    pub const fn task_draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.task_draft
    }

    /// Returns the pending new-board input.
    #[must_use]
    pub const fn board_draft(&self) -> &BoardDraft {
        &self.board_draft
    }

    /// Returns the pending new-board input for editing.
    pub const fn board_draft_mut(&mut self) -> &mut BoardDraft {
        &mut self.board_draft
    }

    /// Loads the caller's boards, replacing the default boards.
    ///
    /// An account without boards gets the configured bootstrap boards
    /// created in the store. The first board becomes active and its tasks
    /// are fetched.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when no identity is available or the store
    /// fails; the default boards then stay in place.
    pub async fn load(&mut self) -> BoardResult<()> {
        self.loading = true;
        let result = self.fetch_boards().await;
        self.loading = false;
        let loaded = self.settle(result)?;
        self.active = loaded.first().map(Board::id);
        self.boards = loaded;
        tracing::debug!(boards = self.boards.len(), "loaded boards");
        Ok(())
    }

    async fn fetch_boards(&self) -> BoardResult<Vec<Board>> {
        let identity = self.resolve_identity().await?;
        let mut boards = self.store.list_boards(&identity).await?;
        if boards.is_empty() {
            boards = self.bootstrap(&identity).await?;
        }
        if let Some(first) = boards.first_mut() {
            let tasks = self.fetch_tasks(&identity, first.id()).await?;
            first.replace_tasks(tasks);
        }
        Ok(boards)
    }

    async fn bootstrap(&self, identity: &Identity) -> BoardResult<Vec<Board>> {
        let mut created = Vec::with_capacity(self.config.bootstrap_boards.len());
        for template in &self.config.bootstrap_boards {
            let blueprint = NewBoard::new(
                BoardName::new(template.name.clone())?,
                template.icon.clone(),
                template.color.clone(),
            );
            created.push(self.store.create_board(identity, &blueprint).await?);
        }
        tracing::debug!(user_id = %identity.user_id(), "provisioned bootstrap boards");
        Ok(created)
    }

    /// Makes `id` the active board, fetching its tasks when it is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BoardNotFound`] when the board is not in the
    /// session, or a store error when fetching tasks fails.
    pub async fn select_board(&mut self, id: BoardId) -> BoardResult<()> {
        let result = self.fetch_board_tasks(id).await;
        let fetched = self.settle(result)?;
        if let Some(tasks) = fetched {
            self.board_mut(id)?.replace_tasks(tasks);
        }
        self.active = Some(id);
        Ok(())
    }

    async fn fetch_board_tasks(&self, id: BoardId) -> BoardResult<Option<Vec<Task>>> {
        let board = self.board(id).ok_or(BoardError::BoardNotFound(id))?;
        match board.kind() {
            BoardKind::Default => Ok(None),
            BoardKind::Persisted => {
                let identity = self.resolve_identity().await?;
                Ok(Some(self.fetch_tasks(&identity, id).await?))
            }
        }
    }

    async fn fetch_tasks(&self, identity: &Identity, id: BoardId) -> BoardResult<Vec<Task>> {
        Ok(self.store.list_tasks(identity, id).await?)
    }

    /// Creates a board from `draft` and makes it active.
    ///
    /// Returns `Ok(None)` without contacting the store when the name is
    /// blank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when no identity is available or the store
    /// rejects the board.
    pub async fn add_board(&mut self, draft: &BoardDraft) -> BoardResult<Option<Board>> {
        if draft.name.trim().is_empty() {
            return Ok(None);
        }
        let result = self.create_board(draft).await;
        let board = self.settle(result)?;
        self.active = Some(board.id());
        self.boards.push(board.clone());
        self.board_draft.name.clear();
        self.board_draft.open = false;
        tracing::debug!(board_id = %board.id(), "added board");
        Ok(Some(board))
    }

    /// Submits the pending new-board draft.
    ///
    /// # Errors
    ///
    /// As [`Self::add_board`].
    pub async fn submit_board_draft(&mut self) -> BoardResult<Option<Board>> {
        let draft = self.board_draft.clone();
        self.add_board(&draft).await
    }

    async fn create_board(&self, draft: &BoardDraft) -> BoardResult<Board> {
        let blueprint = NewBoard::new(
            BoardName::new(draft.name.as_str())?,
            draft.icon.clone(),
            draft.color.clone(),
        );
        let identity = self.resolve_identity().await?;
        Ok(self.store.create_board(&identity, &blueprint).await?)
    }

    /// Deletes a board and its tasks.
    ///
    /// The personal board is permanent and the last remaining board cannot be
    /// removed. When the active board is deleted the first remaining board
    /// becomes active.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Forbidden`] for the personal board or the last
    /// board,
    /// [`BoardError::BoardNotFound`] when the board is not in the session, or
    /// a store error for persisted boards.
    pub async fn delete_board(&mut self, id: BoardId) -> BoardResult<()> {
        let result = self.remove_board_remotely(id).await;
        self.settle(result)?;
        self.boards.retain(|board| board.id() != id);
        if self.active == Some(id) {
            self.active = self.boards.first().map(Board::id);
        }
        tracing::debug!(board_id = %id, "deleted board");
        Ok(())
    }

    async fn remove_board_remotely(&self, id: BoardId) -> BoardResult<()> {
        if id.is_personal() {
            return Err(BoardError::Forbidden(id));
        }
        let board = self.board(id).ok_or(BoardError::BoardNotFound(id))?;
        if self.boards.len() <= 1 {
            return Err(BoardError::Forbidden(id));
        }
        if board.kind() == BoardKind::Persisted {
            let identity = self.resolve_identity().await?;
            self.store.delete_board(&identity, id).await?;
        }
        Ok(())
    }

    /// Adds a task to a board.
    ///
    /// Returns `Ok(None)` without any effect when the title is blank. On the
    /// personal board the assignee is always the configured owner label;
    /// elsewhere it is required.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] for a blank assignee,
    /// [`BoardError::BoardNotFound`] when the board is not in the session,
    /// or an identity or store error.
    pub async fn add_task(
        &mut self,
        board_id: BoardId,
        title: &str,
        assignee: &str,
    ) -> BoardResult<Option<Task>> {
        if title.trim().is_empty() {
            return Ok(None);
        }
        let result = self.create_task(board_id, title, assignee).await;
        let task = self.settle(result)?;
        self.board_mut(board_id)?.push_task(task.clone());
        self.task_draft.title.clear();
        if !board_id.is_personal() {
            self.task_draft.assignee.clear();
        }
        tracing::debug!(task_id = %task.id(), board_id = %board_id, "added task");
        Ok(Some(task))
    }

    /// Adds a task to the active board from the pending draft.
    ///
    /// A blank title does nothing, even without an active board.
    ///
    /// # Errors
    ///
    /// As [`Self::add_task`]; [`BoardError::NoActiveBoard`] when no board is
    /// active.
    pub async fn submit_task_draft(&mut self) -> BoardResult<Option<Task>> {
        let TaskDraft { title, assignee } = self.task_draft.clone();
        if title.trim().is_empty() {
            return Ok(None);
        }
        let Some(board_id) = self.active else {
            return self.settle(Err(BoardError::NoActiveBoard));
        };
        self.add_task(board_id, &title, &assignee).await
    }

    async fn create_task(
        &self,
        board_id: BoardId,
        title: &str,
        assignee: &str,
    ) -> BoardResult<Task> {
        let board = self.board(board_id).ok_or(BoardError::BoardNotFound(board_id))?;
        let task_title = TaskTitle::new(title)?;
        let task_assignee = if board_id.is_personal() {
            Assignee::new(self.config.personal_assignee.as_str())?
        } else {
            Assignee::new(assignee)?
        };
        let kind = board.kind();
        let identity = self.resolve_identity().await?;
        let new_task = NewTask::new(
            board_id,
            identity.user_id(),
            task_title,
            task_assignee,
            self.clock.utc(),
        );
        match kind {
            BoardKind::Default => Ok(new_task.into_task(TaskId::new())),
            BoardKind::Persisted => Ok(self.store.create_task(&identity, &new_task).await?),
        }
    }

    /// Moves a task on the active board to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] when the task is not on the
    /// active board, or an identity, store or timestamp error.
    pub async fn move_task(&mut self, task_id: TaskId, target: TaskStatus) -> BoardResult<Task> {
        let result = self.transition_task(task_id, target).await;
        let (board_id, task) = self.settle(result)?;
        self.board_mut(board_id)?.replace_task(task.clone());
        tracing::debug!(task_id = %task_id, status = %target, "moved task");
        Ok(task)
    }

    /// Handles a task dropped on the column named `target`.
    ///
    /// Dropping a task on its own column does nothing and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Domain`] with
    /// [`TaskDomainError::InvalidTransition`] for an unknown column, otherwise
    /// as [`Self::move_task`].
    ///
    /// [`TaskDomainError::InvalidTransition`]: crate::board::domain::TaskDomainError::InvalidTransition
    pub async fn drop_task(
        &mut self,
        task_id: TaskId,
        target: &str,
    ) -> BoardResult<Option<Task>> {
        let parsed = TaskStatus::try_from(target).map_err(BoardError::from);
        let status = self.settle(parsed)?;
        let current = self
            .active_board()
            .and_then(|board| board.task(task_id))
            .map(Task::status);
        if current == Some(status) {
            return Ok(None);
        }
        self.move_task(task_id, status).await.map(Some)
    }

    async fn transition_task(
        &self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> BoardResult<(BoardId, Task)> {
        let (board, task) = self.active_task(task_id)?;
        let board_id = board.id();
        let updated = match board.kind() {
            BoardKind::Default => apply_transition(task, target, self.clock.utc())?,
            BoardKind::Persisted => {
                let identity = self.resolve_identity().await?;
                self.store
                    .update_task_status(&identity, task_id, StatusUpdate::new(target))
                    .await?
            }
        };
        Ok((board_id, updated))
    }

    /// Deletes a task from the active board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] when the task is not on the
    /// active board, or an identity or store error.
    pub async fn delete_task(&mut self, task_id: TaskId) -> BoardResult<()> {
        let result = self.remove_task_remotely(task_id).await;
        let board_id = self.settle(result)?;
        self.board_mut(board_id)?.remove_task(task_id);
        tracing::debug!(task_id = %task_id, "deleted task");
        Ok(())
    }

    async fn remove_task_remotely(&self, task_id: TaskId) -> BoardResult<BoardId> {
        let (board, _) = self.active_task(task_id)?;
        let board_id = board.id();
        if board.kind() == BoardKind::Persisted {
            let identity = self.resolve_identity().await?;
            self.store.delete_task(&identity, task_id).await?;
        }
        Ok(board_id)
    }

    fn active_task(&self, task_id: TaskId) -> BoardResult<(&Board, &Task)> {
        self.active_board()
            .and_then(|board| board.task(task_id).map(|task| (board, task)))
            .ok_or(BoardError::TaskNotFound(task_id))
    }

    fn board_mut(&mut self, id: BoardId) -> BoardResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|board| board.id() == id)
            .ok_or(BoardError::BoardNotFound(id))
    }

    async fn resolve_identity(&self) -> BoardResult<Identity> {
        let identity = self.identity.current_identity().await?;
        Ok(identity.ok_or(AuthError::NotAuthenticated)?)
    }

    fn settle<T>(&mut self, result: BoardResult<T>) -> BoardResult<T> {
        match &result {
            Ok(_) => self.error = None,
            Err(err) => {
                tracing::warn!(kind = ?err.kind(), error = %err, "board operation failed");
                self.error = Some(err.to_string());
            }
        }
        result
    }
}
