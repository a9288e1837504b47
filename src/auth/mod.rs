//! Authentication collaborator.
//!
//! The board services never read an ambient "current user"; they ask an
//! [`ports::IdentityProvider`] for the caller and pass the resulting
//! [`domain::Identity`] explicitly to every store operation.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The route guard in [`gate`]

pub mod adapters;
pub mod domain;
pub mod gate;
pub mod ports;
