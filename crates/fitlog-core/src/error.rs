//! Error types for FitLog

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FitlogError>;

#[derive(Error, Debug)]
pub enum FitlogError {
    #[error("{0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
