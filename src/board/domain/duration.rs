//! Elapsed-time rendering for completed tasks.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use std::fmt;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Elapsed time decomposed into truncated day/hour/minute/second units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl ElapsedTime {
    /// Decomposes the span between two instants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NegativeSpan`] when `end` precedes `start`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TaskDomainError> {
        if end < start {
            return Err(TaskDomainError::NegativeSpan { start, end });
        }
        Ok(Self::from_millis(end.signed_duration_since(start).num_milliseconds()))
    }

    const fn from_millis(millis: i64) -> Self {
        Self {
            days: millis.div_euclid(MILLIS_PER_DAY),
            hours: millis.div_euclid(MILLIS_PER_HOUR).rem_euclid(24),
            minutes: millis.div_euclid(MILLIS_PER_MINUTE).rem_euclid(60),
            seconds: millis.div_euclid(MILLIS_PER_SECOND).rem_euclid(60),
        }
    }

    /// Whole days.
    #[must_use]
    pub const fn days(self) -> i64 {
        self.days
    }

    /// Hours past the last whole day.
    #[must_use]
    pub const fn hours(self) -> i64 {
        self.hours
    }

    /// Minutes past the last whole hour.
    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.minutes
    }

    /// Seconds past the last whole minute.
    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.seconds
    }
}

/// Renders the two largest applicable units (three when days are present).
impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            days,
            hours,
            minutes,
            seconds,
        } = *self;
        if days > 0 {
            write!(f, "{days}d {hours}h {minutes}m")
        } else if hours > 0 {
            write!(f, "{hours}h {minutes}m")
        } else if minutes > 0 {
            write!(f, "{minutes}m {seconds}s")
        } else {
            write!(f, "{seconds}s")
        }
    }
}

/// Computes the human-readable duration between two instants.
///
/// # Errors
///
/// Returns [`TaskDomainError::NegativeSpan`] when `end` precedes `start`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use taskboard::board::domain::compute_duration;
///
/// let start = Utc::now();
/// let end = start + TimeDelta::seconds(90);
/// assert_eq!(compute_duration(start, end).as_deref(), Ok("1m 30s"));
/// ```
pub fn compute_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<String, TaskDomainError> {
    ElapsedTime::between(start, end).map(|elapsed| elapsed.to_string())
}

/// Parses an RFC 3339 instant as exchanged with external records.
///
/// # Errors
///
/// Returns [`TaskDomainError::MalformedInstant`] when the value does not
/// parse.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, TaskDomainError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| TaskDomainError::MalformedInstant(value.to_owned()))
}

/// Computes a duration from two RFC 3339 instants.
///
/// # Errors
///
/// Returns [`TaskDomainError::MalformedInstant`] when either value does not
/// parse, or [`TaskDomainError::NegativeSpan`] when `end` precedes `start`.
pub fn compute_duration_between(start: &str, end: &str) -> Result<String, TaskDomainError> {
    compute_duration(parse_instant(start)?, parse_instant(end)?)
}
