//! In-memory identity provider.

mod provider;

pub use provider::InMemoryIdentityProvider;
