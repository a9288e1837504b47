//! Error types for board and task domain validation.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or transitioning board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The assignee is empty after trimming on a board that requires one.
    #[error("assignee must not be empty")]
    EmptyAssignee,

    /// The board name is empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// The requested status is not one of the known workflow columns.
    #[error("invalid transition target status: {0}")]
    InvalidTransition(String),

    /// A duration was requested for a span that ends before it starts.
    #[error("span ends at {end} before it starts at {start}")]
    NegativeSpan {
        /// Span start.
        start: DateTime<Utc>,
        /// Span end.
        end: DateTime<Utc>,
    },

    /// An instant could not be parsed as an RFC 3339 timestamp.
    #[error("malformed instant: {0}")]
    MalformedInstant(String),

    /// A board identifier is neither a reserved name nor a UUID.
    #[error("invalid board identifier: {0}")]
    InvalidBoardId(String),
}
