//! Database configuration module for `Talk2Trade`.
//!
//! Handles the `SQLite` connection and creation of the `kv_store` table using `SeaORM`.
//! The table is generated from the entity definition with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust struct.

use crate::config::AppConfig;
use crate::entities::KvEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;

/// Fallback database location when neither `DATABASE_URL` nor config.toml set one.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/talk2trade.sqlite?mode=rwc";

/// Resolves the database URL: `DATABASE_URL`, then config.toml, then the default.
#[must_use]
pub fn get_database_url(config: &AppConfig) -> String {
    std::env::var("DATABASE_URL")
        .ok()
        .or_else(|| config.database_url.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the directory that will hold a file-backed `SQLite` database.
///
/// In-memory and non-`SQLite` URLs are left alone.
pub fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    tracing::debug!("Connecting to database at {database_url}");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `kv_store` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut kv_table = schema.create_table_from_entity(KvEntry);
    kv_table.if_not_exists();

    db.execute(builder.build(&kv_table)).await?;

    Ok(())
}
