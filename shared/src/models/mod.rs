//! Domain models

pub mod product;

pub use product::{Product, SPEC_DIMENSIONS, SPEC_MATERIAL, SPEC_WEIGHT};
