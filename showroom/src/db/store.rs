//! Product Store
//!
//! Repository over the product collection: point writes, point deletes, and
//! a standing live query delivering full-collection snapshots. The payload of
//! individual change notifications is deliberately ignored — every push
//! redelivers the whole collection sorted by name, so the mirror never has to
//! patch incrementally.

use std::sync::Mutex;

use dashmap::DashMap;
use futures::StreamExt;
use serde::Serialize;
use shared::Product;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const PRODUCT_TABLE: &str = "product";

/// Buffered snapshots per subscription — enough to absorb write bursts
const SNAPSHOT_CAPACITY: usize = 16;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Subscription error: {0}")]
    Subscription(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// One full-collection push, sorted by name ascending
pub type Snapshot = Vec<Product>;

/// Handle for a standing live query.
///
/// Yields the initial collection state followed by a fresh snapshot after
/// every change. Cancelling (or dropping the handle) stops delivery; a
/// cancelled subscription cannot be restarted, only re-established.
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
    cancel: CancellationToken,
}

impl Subscription {
    fn new(rx: mpsc::Receiver<Snapshot>, cancel: CancellationToken) -> Self {
        Self { rx, cancel }
    }

    /// Wait for the next snapshot; `None` once the subscription has ended
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Non-blocking drain for the UI event loop
    pub fn try_recv(&mut self) -> Option<Snapshot> {
        self.rx.try_recv().ok()
    }

    /// Stop further delivery
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.rx.close();
    }
}

/// Remote collection boundary consumed by the controller and the mirror
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// Full-document upsert keyed by `product.id`
    async fn set(&self, product: Product) -> StoreResult<()>;

    /// Point delete; deleting an absent id is not an error
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// All products sorted by name ascending
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// Establish the standing live query
    async fn watch(&self) -> StoreResult<Subscription>;
}

// =============================================================================
// SurrealDB-backed store
// =============================================================================

/// Document body persisted under the record key; the key itself carries the
/// product id, so the body must not repeat it
#[derive(Debug, Serialize)]
struct ProductDoc {
    name: String,
    category: String,
    description: String,
    price: f64,
    stock: u32,
    images: Vec<String>,
    features: Vec<String>,
    specifications: std::collections::BTreeMap<String, String>,
}

impl From<&Product> for ProductDoc {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            category: p.category.clone(),
            description: p.description.clone(),
            price: p.price,
            stock: p.stock,
            images: p.images.clone(),
            features: p.features.clone(),
            specifications: p.specifications.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SurrealProductStore {
    db: Surreal<Db>,
}

impl SurrealProductStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl ProductStore for SurrealProductStore {
    async fn set(&self, product: Product) -> StoreResult<()> {
        let doc = ProductDoc::from(&product);
        let _: Option<serde::de::IgnoredAny> = self
            .db
            .upsert((PRODUCT_TABLE, product.id.as_str()))
            .content(doc)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _: Option<serde::de::IgnoredAny> = self.db.delete((PRODUCT_TABLE, id)).await?;
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let products: Vec<Product> = self
            .db
            .query(
                "SELECT record::id(id) AS id, name, category, description, price, stock, \
                 images, features, specifications FROM product ORDER BY name ASC",
            )
            .await?
            .take(0)?;
        Ok(products)
    }

    async fn watch(&self) -> StoreResult<Subscription> {
        // Register the live query before taking the initial snapshot so no
        // change can fall between the two.
        let mut stream = self
            .db
            .select::<Vec<serde::de::IgnoredAny>>(PRODUCT_TABLE)
            .live()
            .await
            .map_err(|e| StoreError::Subscription(e.to_string()))?;
        let initial = self.find_all().await?;

        let (tx, rx) = mpsc::channel(SNAPSHOT_CAPACITY);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let store = self.clone();

        tokio::spawn(async move {
            if tx.send(initial).await.is_err() {
                return;
            }
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    item = stream.next() => match item {
                        Some(Ok(_notification)) => match store.find_all().await {
                            Ok(snapshot) => {
                                if tx.send(snapshot).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                // Mirror stays stale-but-consistent
                                tracing::error!("Live requery failed: {e}");
                            }
                        },
                        Some(Err(e)) => tracing::error!("Live delivery error: {e}"),
                        None => break,
                    },
                }
            }
            tracing::debug!("Product live query ended");
        });

        Ok(Subscription::new(rx, cancel))
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory `ProductStore` with the same snapshot-push behaviour as the
/// database-backed one. Backs unit tests and offline runs.
#[derive(Default)]
pub struct MemoryStore {
    items: DashMap<String, Product>,
    subscribers: Mutex<Vec<mpsc::Sender<Snapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection state sorted by name (id as tie-break for determinism)
    pub fn snapshot(&self) -> Snapshot {
        let mut products: Vec<Product> = self.items.iter().map(|e| e.value().clone()).collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        products
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        subscribers.retain(|tx| match tx.try_send(snapshot.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                // Subscriber lagging; it will catch up on the next push
                tracing::debug!("Dropping snapshot for slow subscriber");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }
}

#[async_trait::async_trait]
impl ProductStore for MemoryStore {
    async fn set(&self, product: Product) -> StoreResult<()> {
        self.items.insert(product.id.clone(), product);
        self.publish();
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.items.remove(id);
        self.publish();
        Ok(())
    }

    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.snapshot())
    }

    async fn watch(&self) -> StoreResult<Subscription> {
        let (tx, rx) = mpsc::channel(SNAPSHOT_CAPACITY);
        let _ = tx.try_send(self.snapshot());
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        Ok(Subscription::new(rx, CancellationToken::new()))
    }
}
