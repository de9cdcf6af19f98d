use super::KeyValueStore;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// In-memory [`KeyValueStore`].
///
/// Contents are lost when the store is dropped. [`MemoryKeyValueStore::set_failing`]
/// makes every call return [`Error::StorageUnavailable`], which is how the fail-soft
/// paths of the catalog and settings stores are exercised.
/// [`MemoryKeyValueStore::set_failing_reads`] breaks only `get`.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    failing: AtomicBool,
    failing_reads: AtomicBool,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            failing: AtomicBool::new(false),
            failing_reads: AtomicBool::new(false),
        }
    }

    /// Switches failure injection on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes `get` fail while `set` and `remove` keep working.
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    /// Reads a raw value without going through failure injection.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::storage("in-memory store is in failing mode"));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(Error::storage("in-memory store is failing reads"));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.check_available()?;
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.check_available()?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_and_remove() -> Result<()> {
        let store = MemoryKeyValueStore::new();
        store.set("k", "v".to_string()).await?;
        assert_eq!(store.get("k").await?.as_deref(), Some("v"));
        store.remove("k").await?;
        assert_eq!(store.get("k").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_failing_mode_rejects_every_call() {
        let store = MemoryKeyValueStore::with_entries([("k", "v")]);
        store.set_failing(true);

        assert!(matches!(
            store.get("k").await,
            Err(Error::StorageUnavailable { .. })
        ));
        assert!(store.set("k", "x".to_string()).await.is_err());
        assert!(store.remove("k").await.is_err());
        assert_eq!(store.raw("k").await.as_deref(), Some("v"));

        store.set_failing(false);
        assert!(store.get("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_reads_still_accept_writes() -> Result<()> {
        let store = MemoryKeyValueStore::new();
        store.set_failing_reads(true);

        assert!(store.get("k").await.is_err());
        store.set("k", "v".to_string()).await?;
        assert_eq!(store.raw("k").await.as_deref(), Some("v"));

        store.set_failing_reads(false);
        assert_eq!(store.get("k").await?.as_deref(), Some("v"));
        Ok(())
    }
}
