//! Pending form input held by a board collection.

/// Unsubmitted new-task input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title text as typed.
    pub title: String,
    /// Assignee text as typed. Ignored on the personal board.
    pub assignee: String,
}

/// Unsubmitted new-board input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDraft {
    /// Whether the new-board form is showing.
    pub open: bool,
    /// Name text as typed.
    pub name: String,
    /// Selected icon glyph.
    pub icon: String,
    /// Selected color token.
    pub color: String,
}

impl BoardDraft {
    /// Creates a closed, empty draft with the given preselections.
    #[must_use]
    pub fn new(icon: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            open: false,
            name: String::new(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}
