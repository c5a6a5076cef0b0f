//! Storage layer
//!
//! Two interchangeable backends behind the core storage ports:
//! an embedded SQLite database and an in-memory store. Identical
//! external semantics, except SQLite survives restarts.

pub mod db;
pub mod memory;

pub use db::Database;
pub use memory::MemoryStore;
