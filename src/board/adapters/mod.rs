//! Store adapters for boards and tasks.
//!
//! - [`memory::InMemoryBoardStore`]: thread-safe in-process storage
//! - [`postgres::PostgresBoardStore`]: `PostgreSQL` persistence using Diesel

pub mod memory;
pub mod postgres;
