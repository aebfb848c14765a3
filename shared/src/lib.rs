//! Shared types for the Showroom catalog manager
//!
//! Domain model, error types, and utility helpers used by the application
//! crate and its tests.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult};
pub use models::Product;
