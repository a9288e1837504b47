//! Identity provider port.

use crate::auth::domain::{AuthResult, Credentials, Identity, Session, SignUpRequest};
use async_trait::async_trait;

/// Authentication service contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the caller of the current session.
    ///
    /// Returns `None` when nobody is signed in. Callers must treat `None` as
    /// an authentication failure.
    async fn current_identity(&self) -> AuthResult<Option<Identity>>;

    /// Starts a session from email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the credentials do not
    /// match an account.
    ///
    /// [`AuthError::InvalidCredentials`]: crate::auth::domain::AuthError::InvalidCredentials
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session>;

    /// Creates an account and starts a session for it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AccountExists`] when the email is taken.
    ///
    /// [`AuthError::AccountExists`]: crate::auth::domain::AuthError::AccountExists
    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<Session>;

    /// Ends the current session. Signing out without a session succeeds.
    async fn sign_out(&self) -> AuthResult<()>;
}
