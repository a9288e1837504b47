//! Thread-safe in-memory identity provider.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::auth::{
    domain::{
        AuthError, AuthResult, Credentials, Email, Identity, Session, SignUpRequest, UserId,
    },
    ports::IdentityProvider,
};

/// Identity provider holding accounts and the current session in memory.
///
/// Passwords are kept as SHA-256 digests keyed by email address.
pub struct InMemoryIdentityProvider<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<ProviderState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[derive(Debug, Default)]
struct ProviderState {
    accounts: HashMap<Email, Account>,
    session: Option<Session>,
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_digest: String,
}

impl InMemoryIdentityProvider<DefaultClock> {
    /// Creates an empty provider using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryIdentityProvider<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty provider stamping sessions with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ProviderState::default())),
            clock,
        }
    }

    fn write_state(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, ProviderState>> {
        self.state
            .write()
            .map_err(|err| AuthError::provider(std::io::Error::other(err.to_string())))
    }
}

fn password_digest(email: &Email, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_str().as_bytes());
    hasher.update([0_u8]);
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[async_trait]
impl<C> IdentityProvider for InMemoryIdentityProvider<C>
where
    C: Clock + Send + Sync,
{
    async fn current_identity(&self) -> AuthResult<Option<Identity>> {
        let state = self
            .state
            .read()
            .map_err(|err| AuthError::provider(std::io::Error::other(err.to_string())))?;
        Ok(state
            .session
            .as_ref()
            .map(|session| session.identity().clone()))
    }

    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        let mut state = self.write_state()?;
        let digest = password_digest(credentials.email(), credentials.password());
        let identity = state
            .accounts
            .get(credentials.email())
            .filter(|account| account.password_digest == digest)
            .map(|account| account.identity.clone())
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::new(identity, self.clock.utc());
        state.session = Some(session.clone());
        tracing::debug!(user_id = %session.identity().user_id(), "signed in");
        Ok(session)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> AuthResult<Session> {
        let mut state = self.write_state()?;
        let email = request.credentials().email().clone();
        if state.accounts.contains_key(&email) {
            return Err(AuthError::AccountExists(email));
        }

        let identity = Identity::new(
            UserId::new(),
            email.clone(),
            Some(request.full_name().to_owned()),
        );
        let account = Account {
            identity: identity.clone(),
            password_digest: password_digest(&email, request.credentials().password()),
        };
        state.accounts.insert(email, account);

        let session = Session::new(identity, self.clock.utc());
        state.session = Some(session.clone());
        tracing::debug!(user_id = %session.identity().user_id(), "signed up");
        Ok(session)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let mut state = self.write_state()?;
        if let Some(session) = state.session.take() {
            tracing::debug!(user_id = %session.identity().user_id(), "signed out");
        }
        Ok(())
    }
}
