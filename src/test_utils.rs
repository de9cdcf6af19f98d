//! Shared test utilities for `Talk2Trade`.
//!
//! Builds catalogs over in-memory capabilities, with handles kept
//! so tests can flip connectivity, inject storage failures and inspect notifications.

use crate::{
    connectivity::{ConnectivityProbe, StaticConnectivity},
    core::ProductCatalog,
    errors::Result,
    models::ProductDraft,
    notifications::{NotificationSink, RecordingNotificationSink},
    storage::{KeyValueStore, MemoryKeyValueStore},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with the `kv_store` table.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A catalog plus handles to the capabilities behind it.
pub struct TestHarness {
    /// Backing store (in-memory harnesses only)
    pub store: Arc<MemoryKeyValueStore>,
    /// Connectivity reported to the catalog, online by default
    pub connectivity: Arc<StaticConnectivity>,
    /// Every notification emitted by the catalog
    pub notifier: Arc<RecordingNotificationSink>,
    /// Catalog under test
    pub catalog: ProductCatalog,
}

/// Harness over an empty in-memory store.
pub fn harness() -> TestHarness {
    build(Arc::new(MemoryKeyValueStore::new()), None)
}

/// Harness over an in-memory store pre-populated with raw blobs.
pub fn harness_with_entries<const N: usize>(entries: [(&str, &str); N]) -> TestHarness {
    build(Arc::new(MemoryKeyValueStore::with_entries(entries)), None)
}

/// Harness whose catalog uses `backend`. The `store` handle is then an
/// unrelated empty in-memory store.
pub fn harness_with_store(backend: Arc<dyn KeyValueStore>) -> TestHarness {
    build(Arc::new(MemoryKeyValueStore::new()), Some(backend))
}

fn build(store: Arc<MemoryKeyValueStore>, backend: Option<Arc<dyn KeyValueStore>>) -> TestHarness {
    let backend = backend.unwrap_or_else(|| Arc::clone(&store) as Arc<dyn KeyValueStore>);
    let connectivity = Arc::new(StaticConnectivity::online());
    let notifier = Arc::new(RecordingNotificationSink::new());

    TestHarness {
        catalog: ProductCatalog::new(
            backend,
            Arc::clone(&connectivity) as Arc<dyn ConnectivityProbe>,
            Arc::clone(&notifier) as Arc<dyn NotificationSink>,
        ),
        store,
        connectivity,
        notifier,
    }
}

/// Draft with the given name, price and quantity; other fields empty.
pub fn draft(name: &str, price: f64, quantity: u32) -> ProductDraft {
    ProductDraft {
        price,
        quantity,
        ..ProductDraft::named(name)
    }
}
