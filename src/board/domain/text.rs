//! Validated free-text values.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $error:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated value from trimmed input.
            ///
            /// # Errors
            ///
            #[doc = concat!("Returns [`TaskDomainError::", stringify!($error), "`] when the value is empty after trimming.")]
            pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(TaskDomainError::$error);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

non_empty_text!(
    /// Non-empty task title.
    TaskTitle,
    EmptyTaskTitle
);

non_empty_text!(
    /// Non-empty assignee label.
    Assignee,
    EmptyAssignee
);

non_empty_text!(
    /// Non-empty board name.
    BoardName,
    EmptyBoardName
);
