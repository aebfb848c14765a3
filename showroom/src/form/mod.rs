//! Form Controller
//!
//! Bridges structured form input and the product store, and owns the
//! create-vs-edit state machine: Create (`editing_id = None`) ←→ Edit
//! (`editing_id = Some(id)`). Within one submit or delete the optimistic
//! mirror patch always lands before the remote write is issued; the write's
//! resolution and the following subscription push are unordered relative to
//! further user actions.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::{SPEC_DIMENSIONS, SPEC_MATERIAL, SPEC_WEIGHT};
use shared::{Product, util};

use crate::db::store::ProductStore;
use crate::services::notification::Notifier;
use crate::sync::SyncMirror;

/// Raw form fields as entered, before any derivation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub name: String,
    pub category: String,
    pub price: String,
    pub description: String,
    pub stock: String,
    /// Comma-separated feature list
    pub features: String,
    pub material: String,
    pub dimensions: String,
    pub weight: String,
    /// Newly picked image sources. Empty while editing keeps the record's
    /// existing images unchanged; non-empty fully replaces them.
    pub images: Vec<String>,
}

/// Parse a price field. Any parse failure (including empty text) yields 0,
/// never an error; negatives clamp to 0 to keep the field non-negative.
pub fn parse_price(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
}

/// Parse a stock field; any parse failure yields 0
pub fn parse_stock(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(0)
}

/// Split a comma-separated feature list, trimming each piece and discarding
/// empty ones
pub fn parse_features(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build the specifications map from the three fixed fields; a key is present
/// only when its field is non-empty after trimming
pub fn parse_specifications(material: &str, dimensions: &str, weight: &str) -> BTreeMap<String, String> {
    let mut specifications = BTreeMap::new();
    for (key, value) in [
        (SPEC_MATERIAL, material),
        (SPEC_DIMENSIONS, dimensions),
        (SPEC_WEIGHT, weight),
    ] {
        let value = value.trim();
        if !value.is_empty() {
            specifications.insert(key.to_string(), value.to_string());
        }
    }
    specifications
}

pub struct FormController {
    store: Arc<dyn ProductStore>,
    editing_id: Option<String>,
}

impl FormController {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            editing_id: None,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Derive the candidate record from the raw input. In edit mode the id is
    /// forced to the record under edit and an empty image selection carries
    /// the existing image list over unchanged.
    fn build_record(&self, input: &FormInput, mirror: &SyncMirror) -> Product {
        let images = if let Some(id) = &self.editing_id
            && input.images.is_empty()
        {
            mirror.get(id).map(|p| p.images.clone()).unwrap_or_default()
        } else {
            input.images.clone()
        };

        Product {
            id: self.editing_id.clone().unwrap_or_else(util::record_id),
            name: input.name.clone(),
            category: input.category.clone(),
            description: input.description.clone(),
            price: parse_price(&input.price),
            stock: parse_stock(&input.stock),
            images,
            features: parse_features(&input.features),
            specifications: parse_specifications(&input.material, &input.dimensions, &input.weight),
        }
    }

    /// Submit the form.
    ///
    /// The mirror is patched optimistically before the remote write goes out,
    /// so the grid reflects the change immediately; the authoritative push
    /// arrives asynchronously and may reorder it. A write failure is logged
    /// without rolling the patch back. The form drops to create mode
    /// regardless of outcome.
    pub async fn submit(
        &mut self,
        input: &FormInput,
        mirror: &mut SyncMirror,
        notices: &mut Notifier,
    ) -> Product {
        let was_editing = self.is_editing();
        let product = self.build_record(input, mirror);

        mirror.upsert_local(product.clone());

        match self.store.set(product.clone()).await {
            Ok(()) => {
                if was_editing {
                    notices.success("Product updated");
                } else {
                    notices.success("Product added");
                }
            }
            Err(e) => tracing::error!("Failed to persist product {}: {e}", product.id),
        }

        self.editing_id = None;
        product
    }

    /// Delete `id`. Interactive confirmation happens at the UI layer before
    /// this is called. The mirror entry goes first; if the remote delete then
    /// fails it is logged only, and the next subscription push restores the
    /// record.
    pub async fn delete(&mut self, id: &str, mirror: &mut SyncMirror, notices: &mut Notifier) {
        mirror.remove_local(id);

        match self.store.delete(id).await {
            Ok(()) => notices.success("Product deleted"),
            Err(e) => tracing::error!("Failed to delete product {id}: {e}"),
        }
    }

    /// Copy the record's fields back into a form input and switch to edit
    /// mode. No-op (returns `None`) when the id is not mirrored.
    pub fn begin_edit(&mut self, id: &str, mirror: &SyncMirror) -> Option<FormInput> {
        let product = mirror.get(id)?;
        self.editing_id = Some(product.id.clone());

        Some(FormInput {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            stock: product.stock.to_string(),
            features: product.features.join(", "),
            material: product
                .specifications
                .get(SPEC_MATERIAL)
                .cloned()
                .unwrap_or_default(),
            dimensions: product
                .specifications
                .get(SPEC_DIMENSIONS)
                .cloned()
                .unwrap_or_default(),
            weight: product
                .specifications
                .get(SPEC_WEIGHT)
                .cloned()
                .unwrap_or_default(),
            // Empty selection → carry-over on submit
            images: Vec::new(),
        })
    }

    /// Back to create mode
    pub fn reset(&mut self) {
        self.editing_id = None;
    }
}
