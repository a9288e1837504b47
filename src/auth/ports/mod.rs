//! Port contracts for the external authentication service.

pub mod provider;

pub use provider::IdentityProvider;
