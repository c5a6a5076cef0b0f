//! FitLog Core Library
//!
//! Domain types, error taxonomy, and storage port traits for the FitLog
//! exercise-tracking service.

pub mod error;
pub mod ports;
pub mod types;

pub use error::{FitlogError, Result};
pub use ports::{ExerciseStore, TrackerStore, UserStore};
pub use types::{Exercise, LogQuery, User};
