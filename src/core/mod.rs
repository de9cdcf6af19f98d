//! Core business logic - the product catalog and the settings record.
//!
//! Both stores read-modify-write whole blobs through a [`crate::storage::KeyValueStore`]
//! and never surface storage errors to their callers.

/// Product catalog
pub mod catalog;
/// Sample products shown before anything is saved
pub mod seed;
/// Settings record
pub mod settings;

pub use catalog::{PRODUCTS_KEY, ProductCatalog};
pub use settings::{SETTINGS_KEY, SettingsStore};
