//! Diesel row models for board and task persistence.

use super::schema::{boards, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning account.
    pub user_id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
    /// Color token.
    pub color: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for board records. The identifier is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Owning account.
    pub user_id: uuid::Uuid,
    /// Board name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
    /// Color token.
    pub color: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// Owning account.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Workflow status.
    pub status: String,
    /// Assignee label.
    pub assignee: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First entry into `inProgress`.
    pub started_at: Option<DateTime<Utc>>,
    /// Latest entry into `done`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rendered duration.
    pub duration: Option<String>,
}

/// Insert model for task records. The identifier is assigned by the
/// database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning board.
    pub board_id: uuid::Uuid,
    /// Owning account.
    pub user_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Initial workflow status.
    pub status: String,
    /// Assignee label.
    pub assignee: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Lifecycle columns rewritten on every status change.
#[derive(Debug, Clone, PartialEq, Eq, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskLifecycleChangeset {
    /// Workflow status.
    pub status: String,
    /// First entry into `inProgress`.
    pub started_at: Option<DateTime<Utc>>,
    /// Latest entry into `done`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rendered duration.
    pub duration: Option<String>,
}
