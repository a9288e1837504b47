//! Service-level errors for board collection operations.

use crate::auth::domain::AuthError;
use crate::board::{
    domain::{BoardId, TaskDomainError, TaskId},
    ports::StoreError,
};
use thiserror::Error;

/// Category of a failed operation, as surfaced to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No or invalid identity.
    Auth,
    /// A required field was empty or malformed.
    Validation,
    /// A referenced board or task is absent or not owned by the caller.
    NotFound,
    /// The target status is not a known workflow status.
    InvalidTransition,
    /// The operation is never allowed for the target.
    Forbidden,
    /// The backing store failed.
    Persistence,
}

/// Service-level errors for board collection operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Identity resolution failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The board may not be deleted.
    #[error("board {0} cannot be deleted")]
    Forbidden(BoardId),
    /// The board is not part of the session's collection.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    /// The task is not on the active board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The session has no boards left to act on.
    #[error("no board is active")]
    NoActiveBoard,
    /// The configuration document could not be read.
    #[error("invalid board configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The configuration does not name one template per default board.
    #[error("expected {expected} bootstrap boards, found {found}")]
    BootstrapBoards {
        /// Number of default boards.
        expected: usize,
        /// Number of configured templates.
        found: usize,
    },
}

impl BoardError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(err) => auth_kind(err),
            Self::Domain(err) | Self::Store(StoreError::Domain(err)) => domain_kind(err),
            Self::Store(StoreError::BoardNotFound(_) | StoreError::TaskNotFound(_))
            | Self::BoardNotFound(_)
            | Self::TaskNotFound(_)
            | Self::NoActiveBoard => ErrorKind::NotFound,
            Self::Store(StoreError::Persistence(_)) => ErrorKind::Persistence,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Config(_) | Self::BootstrapBoards { .. } => ErrorKind::Validation,
        }
    }
}

const fn auth_kind(err: &AuthError) -> ErrorKind {
    match err {
        AuthError::MissingField(_) | AuthError::InvalidEmail(_) | AuthError::AccountExists(_) => {
            ErrorKind::Validation
        }
        AuthError::NotAuthenticated | AuthError::InvalidCredentials => ErrorKind::Auth,
        AuthError::Provider(_) => ErrorKind::Persistence,
    }
}

const fn domain_kind(err: &TaskDomainError) -> ErrorKind {
    match err {
        TaskDomainError::InvalidTransition(_) => ErrorKind::InvalidTransition,
        TaskDomainError::EmptyTaskTitle
        | TaskDomainError::EmptyAssignee
        | TaskDomainError::EmptyBoardName
        | TaskDomainError::NegativeSpan { .. }
        | TaskDomainError::MalformedInstant(_)
        | TaskDomainError::InvalidBoardId(_) => ErrorKind::Validation,
    }
}

/// Result type for board collection operations.
pub type BoardResult<T> = Result<T, BoardError>;
