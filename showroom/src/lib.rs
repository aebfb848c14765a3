//! Showroom — live product catalog manager
//!
//! A terminal catalog manager backed by an embedded document database. The
//! product collection is mirrored in memory through a standing live query;
//! the form controller writes through to the store and patches the mirror
//! optimistically, the authoritative snapshot push confirms (or overrides)
//! shortly after.

pub mod core;
pub mod db;
pub mod form;
pub mod render;
pub mod services;
pub mod sync;
pub mod ui;
pub mod utils;

// Re-exports
pub use crate::core::config::Config;
pub use crate::core::state::AppState;
