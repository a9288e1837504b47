//! Sign-in and sign-up form payloads.

use super::{AuthError, Email};
use std::fmt;

/// Email and password presented at sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: String,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] for an empty email or password, or
    /// [`AuthError::InvalidEmail`] for a malformed address.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, AuthError> {
        let address = Email::new(email)?;
        let secret = password.into();
        if secret.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(Self {
            email: address,
            password: secret,
        })
    }

    /// Returns the email.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Sign-up form: profile name plus credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    full_name: String,
    credentials: Credentials,
}

impl SignUpRequest {
    /// Creates a validated sign-up request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingField`] when the name, email or password is
    /// empty, or [`AuthError::InvalidEmail`] for a malformed address.
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let raw_name = full_name.into();
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("full name"));
        }
        Ok(Self {
            full_name: name.to_owned(),
            credentials: Credentials::new(email, password)?,
        })
    }

    /// Returns the profile name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}
