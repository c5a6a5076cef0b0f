//! HTTP handlers

pub mod exercises;
pub mod health;
pub mod users;

pub use health::health;
