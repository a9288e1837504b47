//! Step definitions for board workflow scenarios.

pub mod given;
pub mod world;
