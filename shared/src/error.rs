//! Unified error handling
//!
//! Application-level error enum shared across the workspace. Nothing in this
//! system is fatal: callers log and degrade rather than abort, so the enum
//! stays small and message-oriented.

use thiserror::Error;

/// Application error enum
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Subscription error: {0}")]
    Subscription(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn subscription(msg: impl Into<String>) -> Self {
        Self::Subscription(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
