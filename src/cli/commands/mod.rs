//! Command implementations organized by screen.

/// Language detection and translation
pub mod language;

/// Product list and add/edit form
pub mod product;

/// Settings screen
pub mod settings;

pub use language::LanguageCommand;
pub use product::ProductCommand;
pub use settings::SettingsCommand;
