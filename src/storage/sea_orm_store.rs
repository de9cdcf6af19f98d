use super::KeyValueStore;
use crate::{
    entities::{KvEntry, kv_entry},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{Set, prelude::*};

/// [`KeyValueStore`] backed by the `kv_store` table.
///
/// Each key is a single row; writes update the row in place or insert it.
#[derive(Debug, Clone)]
pub struct SeaOrmKeyValueStore {
    db: DatabaseConnection,
}

impl SeaOrmKeyValueStore {
    /// Wraps an open connection. The `kv_store` table must already exist
    /// (see [`crate::config::database::create_tables`]).
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl KeyValueStore for SeaOrmKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|e| e.value))
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let now = Utc::now().naive_utc();

        let existing = KvEntry::find_by_id(key.to_string()).one(&self.db).await?;

        if let Some(entry) = existing {
            let mut active_model: kv_entry::ActiveModel = entry.into();
            active_model.value = Set(value);
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_entry = kv_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value),
                updated_at: Set(now),
            };
            new_entry.insert(&self.db).await?;
        }

        tracing::trace!("Stored value under key {key}");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let result = KvEntry::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        tracing::trace!("Removed key {key} ({} rows)", result.rows_affected);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_get_missing_key_is_none() -> Result<()> {
        let store = SeaOrmKeyValueStore::new(setup_test_db().await?);
        assert_eq!(store.get("nothing-here").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_then_get() -> Result<()> {
        let store = SeaOrmKeyValueStore::new(setup_test_db().await?);
        store.set("greeting", "namaste".to_string()).await?;
        assert_eq!(store.get("greeting").await?.as_deref(), Some("namaste"));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_row() -> Result<()> {
        let db = setup_test_db().await?;
        let store = SeaOrmKeyValueStore::new(db.clone());
        store.set("k", "first".to_string()).await?;
        store.set("k", "second".to_string()).await?;

        assert_eq!(store.get("k").await?.as_deref(), Some("second"));
        let rows = KvEntry::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_deletes_and_tolerates_absent_key() -> Result<()> {
        let store = SeaOrmKeyValueStore::new(setup_test_db().await?);
        store.set("k", "v".to_string()).await?;
        store.remove("k").await?;
        assert_eq!(store.get("k").await?, None);

        store.remove("k").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_independent() -> Result<()> {
        let store = SeaOrmKeyValueStore::new(setup_test_db().await?);
        store.set("a", "1".to_string()).await?;
        store.set("b", "2".to_string()).await?;
        store.remove("a").await?;
        assert_eq!(store.get("b").await?.as_deref(), Some("2"));
        Ok(())
    }
}
