//! Product Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed specification keys — the only ones ever populated
pub const SPEC_MATERIAL: &str = "Material";
pub const SPEC_DIMENSIONS: &str = "Dimensions";
pub const SPEC_WEIGHT: &str = "Weight";

/// Product entity
///
/// The sole entity of the catalog. `id` acts as the store's primary key and
/// is generated client-side at creation time; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Non-negative; 0 when the form input failed to parse
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    /// Image data URIs or remote URLs, in display order
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    /// Only the fixed keys above; a key is present only when its form field
    /// was non-empty
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            category: String::new(),
            description: String::new(),
            price: 0.0,
            stock: 0,
            images: Vec::new(),
            features: Vec::new(),
            specifications: BTreeMap::new(),
        }
    }
}
