//! Boards and the task lifecycle.
//!
//! A session starts with two default boards that live only in memory. Once
//! loaded, the caller's persisted boards replace them and every mutation on a
//! persisted board goes through a [`ports::BoardStore`]. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
