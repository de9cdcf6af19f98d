//! Command-line front end - stands in for the mobile screens.
//!
//! Parses arguments with `clap`, validates user input the way the add/edit form does,
//! and renders results as text. All state lives in the stores; every command re-reads
//! what it shows.

/// Command implementations (products, settings, language tools)
pub mod commands;

use crate::{
    connectivity::ConnectivityProbe,
    core::{ProductCatalog, SettingsStore},
    errors::Result,
    language::{SpeechTranscriber, Translator},
    notifications::{Notification, NotificationSink},
    storage::KeyValueStore,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

pub use commands::{LanguageCommand, ProductCommand, SettingsCommand};

/// Talk2Trade: add product listings by voice or text.
#[derive(Debug, Parser)]
#[command(name = "talk2trade", version, about, long_about = None)]
pub struct Cli {
    /// Pretend the device has no network connection
    #[arg(long, global = true)]
    pub offline: bool,

    /// Path to the configuration file
    #[arg(long, global = true, default_value = crate::config::app::DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command groups
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage product listings
    #[command(subcommand)]
    Products(ProductCommand),
    /// View and change settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Language detection and translation tools
    #[command(flatten)]
    Language(LanguageCommand),
}

/// Everything a command needs, shared like the bot context of a chat front end.
pub struct AppContext {
    /// Product listings
    pub catalog: ProductCatalog,
    /// Persisted preferences
    pub settings: SettingsStore,
    /// Online/offline state
    pub connectivity: Arc<dyn ConnectivityProbe>,
    /// Where toasts go
    pub notifier: Arc<dyn NotificationSink>,
    /// Text translation service
    pub translator: Arc<dyn Translator>,
    /// Voice input service
    pub transcriber: Arc<dyn SpeechTranscriber>,
}

impl AppContext {
    /// Wires the stores over `store` and the given capabilities.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
        notifier: Arc<dyn NotificationSink>,
        translator: Arc<dyn Translator>,
        transcriber: Arc<dyn SpeechTranscriber>,
    ) -> Self {
        Self {
            catalog: ProductCatalog::new(
                Arc::clone(&store),
                Arc::clone(&connectivity),
                Arc::clone(&notifier),
            ),
            settings: SettingsStore::new(store),
            connectivity,
            notifier,
            translator,
            transcriber,
        }
    }

    /// Warns once per session when working offline with offline mode enabled.
    pub async fn announce_connectivity(&self) {
        if !self.connectivity.is_online().await && self.settings.get().await.offline_mode {
            self.notifier.notify(Notification::offline_mode());
        }
    }
}

/// Runs one command and returns the text to show.
///
/// # Errors
/// Returns an error for invalid user input or a failing language service. Storage
/// problems never surface here.
pub async fn run(ctx: &AppContext, command: Command) -> Result<String> {
    ctx.announce_connectivity().await;
    match command {
        Command::Products(cmd) => commands::product::run(ctx, cmd).await,
        Command::Settings(cmd) => commands::settings::run(ctx, cmd).await,
        Command::Language(cmd) => commands::language::run(ctx, cmd).await,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_app;
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_products_add() {
        let cli = Cli::try_parse_from([
            "talk2trade",
            "--offline",
            "products",
            "add",
            "--name",
            "Rice",
            "--price",
            "50",
        ]);
        assert!(matches!(
            cli,
            Ok(Cli {
                offline: true,
                command: Command::Products(ProductCommand::Add(_)),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_offline_announcement_respects_offline_mode() {
        let app = test_app();
        app.connectivity.set_online(false);
        app.ctx.announce_connectivity().await;
        assert_eq!(app.notifier.received(), vec![Notification::offline_mode()]);

        app.ctx
            .settings
            .set(crate::models::Setting::OfflineMode(false))
            .await;
        app.ctx.announce_connectivity().await;
        assert_eq!(app.notifier.received().len(), 1);
    }
}
