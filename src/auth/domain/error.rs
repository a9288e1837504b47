//! Authentication error types.

use super::Email;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by identity operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// No authenticated identity is available.
    #[error("user not authenticated")]
    NotAuthenticated,

    /// The email and password do not match an account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An account with the email already exists.
    #[error("an account with email {0} already exists")]
    AccountExists(Email),

    /// A required form field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address is not well formed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The identity provider failed.
    #[error("identity provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps an identity provider failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}

/// Result type for identity operations.
pub type AuthResult<T> = Result<T, AuthError>;
