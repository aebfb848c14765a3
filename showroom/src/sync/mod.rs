//! Sync Mirror
//!
//! Local ordered collection mirroring the remote product collection. Every
//! read for rendering comes from here, never from the store directly. The
//! mirror is fully replaced on each subscription push; optimistic patches
//! applied between pushes are provisional until the next push confirms or
//! overrides them.

use std::sync::Arc;

use shared::Product;

use crate::db::store::{ProductStore, Snapshot, Subscription};

#[derive(Debug, Default)]
pub struct SyncMirror {
    products: Vec<Product>,
}

impl SyncMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Authoritative replacement from a subscription push
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.products = snapshot;
    }

    /// Optimistic in-place patch issued before the remote write resolves.
    /// New records land at the end; the next authoritative push moves them
    /// into name order.
    pub fn upsert_local(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.push(product),
        }
    }

    /// Optimistic removal; returns whether the id was present
    pub fn remove_local(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() != before
    }
}

/// Establish the standing live query against the store.
///
/// On failure the error is logged and `None` is returned: the mirror is left
/// stale-but-consistent and no render is forced. No retry — callers keep
/// serving whatever state they already have.
pub async fn subscribe(store: Arc<dyn ProductStore>) -> Option<Subscription> {
    match store.watch().await {
        Ok(subscription) => {
            tracing::info!("Subscribed to product collection");
            Some(subscription)
        }
        Err(e) => {
            tracing::error!("Failed to subscribe to product collection: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product::new(id.to_string(), name.to_string())
    }

    #[test]
    fn snapshot_fully_replaces_contents() {
        let mut mirror = SyncMirror::new();
        mirror.apply_snapshot(vec![product("1", "Chair"), product("2", "Lamp")]);
        assert_eq!(mirror.len(), 2);

        mirror.apply_snapshot(vec![product("3", "Table")]);
        assert_eq!(mirror.len(), 1);
        assert!(mirror.get("1").is_none());
        assert!(mirror.get("3").is_some());
    }

    #[test]
    fn upsert_local_replaces_in_place() {
        let mut mirror = SyncMirror::new();
        mirror.apply_snapshot(vec![product("1", "Chair"), product("2", "Lamp")]);

        let mut updated = product("1", "Chair");
        updated.price = 150000.0;
        mirror.upsert_local(updated);

        assert_eq!(mirror.len(), 2);
        assert_eq!(mirror.products()[0].price, 150000.0);
        // Position unchanged until the authoritative push re-sorts
        assert_eq!(mirror.products()[0].id, "1");
    }

    #[test]
    fn upsert_local_appends_unknown_ids() {
        let mut mirror = SyncMirror::new();
        mirror.upsert_local(product("9", "Zebra Rug"));
        assert_eq!(mirror.len(), 1);
    }

    #[test]
    fn remove_local_reports_presence() {
        let mut mirror = SyncMirror::new();
        mirror.apply_snapshot(vec![product("1", "Chair")]);
        assert!(mirror.remove_local("1"));
        assert!(!mirror.remove_local("1"));
        assert!(mirror.is_empty());
    }
}
