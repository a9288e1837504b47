//! Configuration for board collection sessions.

use super::{BoardError, BoardResult};
use serde::Deserialize;

/// Number of templates `bootstrap_boards` must hold: one per default board.
pub const BOOTSTRAP_BOARD_COUNT: usize = 2;

/// Name, icon and color of a board provisioned automatically.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardTemplate {
    /// Board name.
    pub name: String,
    /// Icon glyph.
    pub icon: String,
    /// Color token.
    pub color: String,
}

impl BoardTemplate {
    /// Creates a template.
    #[must_use]
    pub fn new(name: impl Into<String>, icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// Session configuration for [`BoardCollection`].
///
/// # Examples
///
/// ```
/// use taskboard::board::services::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.personal_assignee, "Me");
/// assert_eq!(config.bootstrap_boards.len(), 2);
/// ```
///
/// [`BoardCollection`]: super::BoardCollection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Assignee label forced onto every task of the personal board.
    pub personal_assignee: String,
    /// Boards created on first load for an account without any; also the
    /// names, icons and colors of the two session-only default boards.
    /// Exactly [`BOOTSTRAP_BOARD_COUNT`] entries, personal first.
    pub bootstrap_boards: Vec<BoardTemplate>,
    /// Icon preselected in the new-board draft.
    pub default_icon: String,
    /// Color preselected in the new-board draft.
    pub default_color: String,
}

impl BoardConfig {
    /// Reads a configuration document. Absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Config`] when `document` does not parse, or
    /// [`BoardError::BootstrapBoards`] when it lists the wrong number of
    /// bootstrap boards.
    pub fn from_json(document: &str) -> BoardResult<Self> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that one bootstrap template exists per default board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::BootstrapBoards`] on a count mismatch.
    pub fn validate(&self) -> BoardResult<()> {
        let found = self.bootstrap_boards.len();
        if found == BOOTSTRAP_BOARD_COUNT {
            Ok(())
        } else {
            Err(BoardError::BootstrapBoards {
                expected: BOOTSTRAP_BOARD_COUNT,
                found,
            })
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            personal_assignee: "Me".to_owned(),
            bootstrap_boards: vec![
                BoardTemplate::new("Personal", "👤", "amber"),
                BoardTemplate::new("Work", "💼", "blue"),
            ],
            default_icon: "📋".to_owned(),
            default_color: "amber".to_owned(),
        }
    }
}
