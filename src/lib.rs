//! Taskboard: kanban-style boards with a tracked task lifecycle.
//!
//! Tasks move between `todo`, `inProgress` and `done`. Starting a task
//! records when work began; finishing it records completion and a
//! human-readable elapsed duration.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`board`]: Boards, tasks, the lifecycle engine and the session manager
//! - [`auth`]: Identity provider contract and the route gate
//! - [`clock`]: A settable clock for deterministic timestamps

pub mod auth;
pub mod board;
pub mod clock;
