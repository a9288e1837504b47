//! Identity domain: accounts, sessions and form validation.

mod credentials;
mod error;
mod identity;

pub use credentials::{Credentials, SignUpRequest};
pub use error::{AuthError, AuthResult};
pub use identity::{Email, Identity, Session, UserId};
