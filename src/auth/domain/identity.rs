//! Account identity and session values.

use super::AuthError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random account identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an account identifier from an existing UUID.
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

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] when the value is empty, or
    /// [`AuthError::InvalidEmail`] when it lacks a local part or domain.
    pub fn new(value: impl Into<String>) -> Result<Self, AuthError> {
        let raw = value.into();
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty())
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(AuthError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The authenticated caller every scoped operation runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    user_id: UserId,
    email: Email,
    full_name: Option<String>,
}

impl Identity {
    /// Creates an identity.
    #[must_use]
    pub const fn new(user_id: UserId, email: Email, full_name: Option<String>) -> Self {
        Self {
            user_id,
            email,
            full_name,
        }
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the account email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the profile name given at sign-up, if any.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Identity,
    signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `identity`.
    #[must_use]
    pub const fn new(identity: Identity, signed_in_at: DateTime<Utc>) -> Self {
        Self {
            identity,
            signed_in_at,
        }
    }

    /// Returns the signed-in identity.
    #[must_use]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns when the session started.
    #[must_use]
    pub const fn signed_in_at(&self) -> DateTime<Utc> {
        self.signed_in_at
    }
}
