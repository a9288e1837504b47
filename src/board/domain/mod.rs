//! Domain model for boards and the task lifecycle.
//!
//! Everything here is pure: timestamps are passed in, and no type knows
//! where records are stored.

mod board;
mod duration;
mod error;
mod ids;
mod lifecycle;
mod palette;
mod status;
mod task;
mod text;

pub use board::{Board, NewBoard, PersistedBoardData, TaskGroups};
pub use duration::{ElapsedTime, compute_duration, compute_duration_between, parse_instant};
pub use error::TaskDomainError;
pub use ids::{BoardId, BoardKind, DefaultBoard, TaskId};
pub use lifecycle::{apply_transition, apply_transition_str};
pub use palette::{BOARD_COLORS, BOARD_ICONS, BoardColor, BoardColorClasses, resolve_color_classes};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task};
pub use text::{Assignee, BoardName, TaskTitle};
