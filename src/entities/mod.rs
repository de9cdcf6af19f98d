//! Entity module - `SeaORM` entity definitions backing the key-value store.

/// Key-value rows
pub mod kv_entry;

pub use kv_entry::{Entity as KvEntry, Model as KvEntryModel};
