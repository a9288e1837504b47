//! Port contracts for board and task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod store;

pub use store::{BoardStore, StatusUpdate, StoreError, StoreResult};
