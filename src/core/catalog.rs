//! Product catalog - the persisted collection of product listings.
//!
//! Every mutation re-reads the whole collection, changes it in memory, writes the whole
//! collection back under [`PRODUCTS_KEY`] and emits one notification. Storage failures
//! are logged and never returned: a broken store must not block the front end.
//!
//! Seed products are a read-only view. [`ProductCatalog::list`] shows them while nothing
//! is persisted, but mutations only ever act on persisted records, so the first `add`
//! on an empty store produces a catalog of exactly one product.
//!
//! Records are decoded one at a time. A record that does not decode is logged, hidden
//! from readers and written back untouched, so one bad entry never costs the others.

use super::seed::seed_products;
use crate::{
    connectivity::ConnectivityProbe,
    errors::{Error, Result},
    models::{Product, ProductDraft, ProductId, ProductPatch},
    notifications::{Notification, NotificationSink},
    storage::KeyValueStore,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Storage key of the serialized product list
pub const PRODUCTS_KEY: &str = "talk2trade-products";

/// One element of the persisted array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum StoredRecord {
    Product(Product),
    /// Kept verbatim so it survives the next write
    Unreadable(Value),
}

impl StoredRecord {
    fn decode(value: Value) -> Self {
        match serde_json::from_value::<Product>(value.clone()) {
            Ok(product) => Self::Product(product),
            Err(e) => {
                warn!("Hiding unreadable product record, it is kept as stored: {e}");
                Self::Unreadable(value)
            }
        }
    }

    fn product(&self) -> Option<&Product> {
        match self {
            Self::Product(product) => Some(product),
            Self::Unreadable(_) => None,
        }
    }

    /// Id in use by this record, including numeric ids of unreadable records.
    fn id_in_use(&self) -> Option<i64> {
        match self {
            Self::Product(product) => Some(product.id.0),
            Self::Unreadable(value) => match value.get("id")? {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            },
        }
    }
}

/// The collection a mutation works on, and whether it may be written back.
struct WorkingSet {
    records: Vec<StoredRecord>,
    /// False when the read failed: writing would clobber records we never saw.
    writable: bool,
}

impl WorkingSet {
    fn find_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.records.iter_mut().find_map(|record| match record {
            StoredRecord::Product(product) if product.id == id => Some(product),
            _ => None,
        })
    }
}

/// Owns the product collection. Front ends get copies, never handles.
pub struct ProductCatalog {
    store: Arc<dyn KeyValueStore>,
    connectivity: Arc<dyn ConnectivityProbe>,
    notifier: Arc<dyn NotificationSink>,
}

impl ProductCatalog {
    /// Creates a catalog over the given capabilities.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            store,
            connectivity,
            notifier,
        }
    }

    /// Returns every product in insertion order.
    ///
    /// Falls back to the seed products when nothing is persisted, the blob is corrupt,
    /// or the store cannot be read.
    pub async fn list(&self) -> Vec<Product> {
        match self.read_persisted().await {
            Ok(Some(records)) => records
                .iter()
                .filter_map(StoredRecord::product)
                .cloned()
                .collect(),
            Ok(None) => {
                debug!("No persisted catalog, showing seed products");
                seed_products(Utc::now())
            }
            Err(e) => {
                warn!("Failed to load products from storage: {e}");
                seed_products(Utc::now())
            }
        }
    }

    /// Looks up one product in the same view [`ProductCatalog::list`] returns.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.list().await.into_iter().find(|p| p.id == id)
    }

    /// Stores a new product built from `draft` and returns it.
    ///
    /// The draft is not validated here. The connectivity probe is asked once; its answer
    /// fixes `offline` and `synced` for the life of the record.
    pub async fn add(&self, draft: ProductDraft) -> Product {
        let mut working = self.load_for_write().await;
        let online = self.connectivity.is_online().await;
        let now = Utc::now();

        let product = Product {
            id: next_id(&working.records, now),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            price: draft.price,
            quantity: draft.quantity,
            local_input: draft.local_input,
            translated_input: draft.translated_input,
            offline: !online,
            synced: online,
            created_at: now,
            updated_at: now,
        };

        working.records.push(StoredRecord::Product(product.clone()));
        self.persist(&working).await;

        info!(
            "Added product {} ({}){}",
            product.id,
            product.name,
            if online { "" } else { " while offline" }
        );
        self.notifier.notify(Notification::product_added(&product.name));
        product
    }

    /// Applies `patch` to the product with `id` and returns the updated record.
    ///
    /// Returns `None`, writes nothing and notifies nobody when `id` is unknown.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Option<Product> {
        let mut working = self.load_for_write().await;
        let Some(product) = working.find_mut(id) else {
            debug!("Update skipped, product {id} not found");
            return None;
        };

        let previous = product.updated_at;
        patch.apply_to(product);
        product.updated_at = next_timestamp(previous, Utc::now());
        let updated = product.clone();

        self.persist(&working).await;

        info!("Updated product {} ({})", updated.id, updated.name);
        self.notifier.notify(Notification::product_updated(&updated.name));
        Some(updated)
    }

    /// Deletes the product with `id`. Returns whether a record was removed.
    pub async fn remove(&self, id: ProductId) -> bool {
        let mut working = self.load_for_write().await;
        let Some((index, removed)) = working.records.iter().enumerate().find_map(|(i, record)| {
            record
                .product()
                .filter(|p| p.id == id)
                .map(|p| (i, p.clone()))
        }) else {
            debug!("Delete skipped, product {id} not found");
            return false;
        };

        working.records.remove(index);
        self.persist(&working).await;

        info!("Deleted product {} ({})", removed.id, removed.name);
        self.notifier.notify(Notification::product_deleted(&removed.name));
        true
    }

    async fn read_persisted(&self) -> Result<Option<Vec<StoredRecord>>> {
        let Some(blob) = self.store.get(PRODUCTS_KEY).await? else {
            return Ok(None);
        };
        let values: Vec<Value> = serde_json::from_str(&blob)?;
        Ok(Some(values.into_iter().map(StoredRecord::decode).collect()))
    }

    async fn load_for_write(&self) -> WorkingSet {
        match self.read_persisted().await {
            Ok(records) => WorkingSet {
                records: records.unwrap_or_default(),
                writable: true,
            },
            Err(Error::Serialization(e)) => {
                warn!("Persisted catalog is corrupt and will be replaced: {e}");
                WorkingSet {
                    records: Vec::new(),
                    writable: true,
                }
            }
            Err(e) => {
                error!("Failed to load products from storage, changes will not be saved: {e}");
                WorkingSet {
                    records: Vec::new(),
                    writable: false,
                }
            }
        }
    }

    async fn persist(&self, working: &WorkingSet) {
        if !working.writable {
            return;
        }
        let blob = match serde_json::to_string(&working.records) {
            Ok(blob) => blob,
            Err(e) => {
                error!("Failed to serialize products: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(PRODUCTS_KEY, blob).await {
            error!("Failed to save products to storage: {e}");
        }
    }
}

/// Time-based id that is also strictly greater than every id already in use.
fn next_id(records: &[StoredRecord], now: DateTime<Utc>) -> ProductId {
    let candidate = now.timestamp_millis();
    let id = records
        .iter()
        .filter_map(StoredRecord::id_in_use)
        .max()
        .map_or(candidate, |max| candidate.max(max.saturating_add(1)));
    ProductId(id)
}

/// `now`, unless the clock has not moved past `previous`; then one millisecond later.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}
