//! Utility helpers

pub mod image;
