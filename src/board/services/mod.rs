//! Application services for board sessions.

mod collection;
mod config;
mod drafts;
mod error;

pub use collection::BoardCollection;
pub use config::{BOOTSTRAP_BOARD_COUNT, BoardConfig, BoardTemplate};
pub use drafts::{BoardDraft, TaskDraft};
pub use error::{BoardError, BoardResult, ErrorKind};
