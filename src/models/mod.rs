//! Plain data types shared by the stores and the front end.

/// Supported input languages
pub mod language;
/// Products, drafts, patches and lenient number parsing
pub mod product;
/// The settings record and single-field updates
pub mod settings;

pub use language::LanguageCode;
pub use product::{Product, ProductDraft, ProductForm, ProductId, ProductPatch};
pub use settings::{Setting, Settings, Theme};
