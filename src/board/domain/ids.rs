//! Identifier types for boards and tasks.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a task record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new random task identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a task identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two reserved boards every session starts with.
///
/// Default boards never reach the store; their tasks live in session memory
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultBoard {
    /// The owner's own board. Permanent, and its tasks are always assigned
    /// to the owner.
    Personal,
    /// The shared work board.
    Work,
}

impl DefaultBoard {
    /// Returns the reserved identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
        }
    }
}

/// Board identifier.
///
/// Reserved identifiers are parsed into [`BoardId::Default`]; everything else
/// must be a UUID assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BoardId {
    /// One of the reserved, non-persisted boards.
    Default(DefaultBoard),
    /// A board record owned by the store.
    Persisted(Uuid),
}

impl BoardId {
    /// Identifier of the reserved personal board.
    pub const PERSONAL: Self = Self::Default(DefaultBoard::Personal);
    /// Identifier of the reserved work board.
    pub const WORK: Self = Self::Default(DefaultBoard::Work);

    /// Creates an identifier for a persisted board.
    #[must_use]
    pub const fn persisted(uuid: Uuid) -> Self {
        Self::Persisted(uuid)
    }

    /// Returns how operations on this board are routed.
    #[must_use]
    pub const fn kind(self) -> BoardKind {
        match self {
            Self::Default(_) => BoardKind::Default,
            Self::Persisted(_) => BoardKind::Persisted,
        }
    }

    /// Returns `true` for the permanent personal board.
    #[must_use]
    pub const fn is_personal(self) -> bool {
        matches!(self, Self::Default(DefaultBoard::Personal))
    }

    /// Returns the store UUID for persisted boards.
    #[must_use]
    pub const fn as_uuid(self) -> Option<Uuid> {
        match self {
            Self::Persisted(uuid) => Some(uuid),
            Self::Default(_) => None,
        }
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(board) => f.write_str(board.as_str()),
            Self::Persisted(uuid) => write!(f, "{uuid}"),
        }
    }
}

impl FromStr for BoardId {
    type Err = TaskDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "personal" => Ok(Self::PERSONAL),
            "work" => Ok(Self::WORK),
            other => Uuid::parse_str(other)
                .map(Self::Persisted)
                .map_err(|_| TaskDomainError::InvalidBoardId(value.to_owned())),
        }
    }
}

impl TryFrom<String> for BoardId {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BoardId> for String {
    fn from(value: BoardId) -> Self {
        value.to_string()
    }
}

/// Routing tag for board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardKind {
    /// Session-only board; mutations apply to local state.
    Default,
    /// Store-backed board; mutations go through the store first.
    Persisted,
}
