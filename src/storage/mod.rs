//! Persistent string-keyed blob storage.
//!
//! The catalog and settings stores only ever talk to a [`KeyValueStore`]. Two adapters
//! are provided: [`SeaOrmKeyValueStore`] for on-device persistence in `SQLite`, and
//! [`MemoryKeyValueStore`] for tests and throwaway sessions.

use crate::errors::Result;
use async_trait::async_trait;

mod memory;
mod sea_orm_store;

pub use memory::MemoryKeyValueStore;
pub use sea_orm_store::SeaOrmKeyValueStore;

/// A persistent blob store addressed by string keys.
///
/// Values are opaque strings; callers serialize structured data themselves.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
