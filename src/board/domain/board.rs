//! Board aggregate and derived task views.

use super::{
    BoardColorClasses, BoardId, BoardKind, BoardName, DefaultBoard, Task, TaskId, TaskStatus,
    resolve_color_classes,
};
use crate::auth::domain::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of tasks.
///
/// Tasks are kept in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: BoardName,
    icon: String,
    color: String,
    tasks: Vec<Task>,
    user_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Board name.
    pub name: BoardName,
    /// Icon glyph.
    pub icon: String,
    /// Color token.
    pub color: String,
    /// Owning account.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a board the store has not created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBoard {
    name: BoardName,
    icon: String,
    color: String,
}

impl NewBoard {
    /// Creates a new board payload.
    #[must_use]
    pub fn new(name: BoardName, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name,
            icon: icon.into(),
            color: color.into(),
        }
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the icon glyph.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the color token.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }
}

impl Board {
    /// Creates one of the reserved session-only boards.
    #[must_use]
    pub fn new_default(board: DefaultBoard, blueprint: NewBoard, created_at: DateTime<Utc>) -> Self {
        Self {
            id: BoardId::Default(board),
            name: blueprint.name,
            icon: blueprint.icon,
            color: blueprint.color,
            tasks: Vec::new(),
            user_id: None,
            created_at,
        }
    }

    /// Reconstructs a stored board with an empty task collection.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: BoardId::persisted(data.id),
            name: data.name,
            icon: data.icon,
            color: data.color,
            tasks: Vec::new(),
            user_id: Some(data.user_id),
            created_at: data.created_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns how operations on this board are routed.
    #[must_use]
    pub const fn kind(&self) -> BoardKind {
        self.id.kind()
    }

    /// Returns the board name.
    #[must_use]
    pub const fn name(&self) -> &BoardName {
        &self.name
    }

    /// Returns the icon glyph.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns the color token.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Resolves the color token to display classes.
    #[must_use]
    pub fn color_classes(&self) -> BoardColorClasses {
        resolve_color_classes(&self.color)
    }

    /// Returns the tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the owning account. Default boards have none.
    #[must_use]
    pub const fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Finds a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Partitions the tasks by status.
    #[must_use]
    pub fn task_groups(&self) -> TaskGroups<'_> {
        TaskGroups::partition(&self.tasks)
    }

    /// Returns the distinct assignees in order of first appearance.
    #[must_use]
    pub fn assignees(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for task in &self.tasks {
            let name = task.assignee().as_str();
            if !seen.contains(&name) {
                seen.push(name);
            }
        }
        seen
    }

    pub(crate) fn replace_tasks(&mut self, mut tasks: Vec<Task>) {
        tasks.sort_by_key(Task::created_at);
        self.tasks = tasks;
    }

    pub(crate) fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub(crate) fn replace_task(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|current| current.id() == task.id()) {
            *slot = task;
        }
    }

    pub(crate) fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id() != id);
    }
}

/// A board's tasks split into the three workflow columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGroups<'a> {
    /// Tasks in `todo`.
    pub todo: Vec<&'a Task>,
    /// Tasks in `inProgress`.
    pub in_progress: Vec<&'a Task>,
    /// Tasks in `done`.
    pub done: Vec<&'a Task>,
}

impl<'a> TaskGroups<'a> {
    /// Splits `tasks` by status, preserving order within each column.
    #[must_use]
    pub fn partition(tasks: &'a [Task]) -> Self {
        let mut groups = Self::default();
        for task in tasks {
            groups.column_mut(task.status()).push(task);
        }
        groups
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Total number of grouped tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when no column holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
