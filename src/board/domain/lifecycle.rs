//! Task lifecycle engine.
//!
//! [`apply_transition`] is the single place where status changes derive
//! `started_at`, `completed_at` and `duration`. Both the in-session path for
//! default boards and the store adapters call it, so the two paths produce
//! identical task shapes.

use super::{Task, TaskDomainError, TaskStatus};
use chrono::{DateTime, Utc};

/// Returns `task` moved to `target` as of `now`, leaving the input untouched.
///
/// # Errors
///
/// Returns [`TaskDomainError::NegativeSpan`] when `now` precedes the task's
/// `started_at` on entry into `done`.
pub fn apply_transition(
    task: &Task,
    target: TaskStatus,
    now: DateTime<Utc>,
) -> Result<Task, TaskDomainError> {
    let mut next = task.clone();
    next.transition_to(target, now)?;
    Ok(next)
}

/// Parses `target` and applies it.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidTransition`] when `target` is not a
/// known status, otherwise as [`apply_transition`].
pub fn apply_transition_str(
    task: &Task,
    target: &str,
    now: DateTime<Utc>,
) -> Result<Task, TaskDomainError> {
    apply_transition(task, TaskStatus::try_from(target)?, now)
}
