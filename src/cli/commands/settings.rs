//! Settings commands - show, change one field, reset to defaults.

use crate::{
    cli::AppContext,
    errors::Result,
    models::{Setting, Settings},
    notifications::Notification,
};
use clap::Subcommand;

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show,
    /// Change one setting, e.g. `set theme dark`
    Set {
        /// notifications, kioskMode, offlineMode, language, autoDetectLanguage, theme,
        /// voiceSensitivity
        key: String,
        /// New value
        value: String,
    },
    /// Restore every setting to its default
    Reset,
}

/// Executes a settings subcommand.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidInput`] when `set` gets an unknown key or a
/// value that does not fit it.
pub async fn run(ctx: &AppContext, command: SettingsCommand) -> Result<String> {
    match command {
        SettingsCommand::Show => Ok(format_settings(&ctx.settings.get().await)),
        SettingsCommand::Set { key, value } => {
            let setting = Setting::parse(&key, &value)?;
            let updated = ctx.settings.set(setting).await;
            if setting == Setting::Notifications(true) {
                ctx.notifier.notify(Notification::success("Notifications enabled"));
            }
            Ok(format!(
                "✅ Updated `{}`\n{}",
                setting.key(),
                format_settings(&updated)
            ))
        }
        SettingsCommand::Reset => {
            let defaults = ctx.settings.reset().await;
            ctx.notifier.notify(Notification::info("Settings reset to defaults"));
            Ok(format!("↩️ Settings reset\n{}", format_settings(&defaults)))
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

/// Settings as a short aligned table.
#[must_use]
pub fn format_settings(s: &Settings) -> String {
    format!(
        "  Smart notifications:     {}\n  \
           Auto language detection: {}\n  \
           Kiosk mode:              {}\n  \
           Offline mode:            {}\n  \
           Voice sensitivity:       {:.1}\n  \
           Default voice language:  {} ({})\n  \
           Theme:                   {}",
        on_off(s.notifications),
        on_off(s.auto_detect_language),
        on_off(s.kiosk_mode),
        on_off(s.offline_mode),
        s.voice_sensitivity,
        s.language.name(),
        s.language.native_name(),
        s.theme
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support::test_app;
    use crate::errors::Error;
    use crate::models::Theme;

    #[tokio::test]
    async fn test_show_defaults() -> Result<()> {
        let app = test_app();
        let out = run(&app.ctx, SettingsCommand::Show).await?;
        assert!(out.contains("Hindi (हिंदी)"));
        assert!(out.lines().any(|l| l.trim_start().starts_with("Theme:") && l.ends_with("light")));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_theme_persists() -> Result<()> {
        let app = test_app();
        let out = run(
            &app.ctx,
            SettingsCommand::Set {
                key: "theme".to_string(),
                value: "dark".to_string(),
            },
        )
        .await?;
        assert!(out.starts_with("✅ Updated `theme`"));
        assert_eq!(app.ctx.settings.get().await.theme, Theme::Dark);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_rejects_out_of_range_sensitivity() {
        let app = test_app();
        let result = run(
            &app.ctx,
            SettingsCommand::Set {
                key: "voiceSensitivity".to_string(),
                value: "2".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        assert_eq!(app.ctx.settings.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_enabling_notifications_notifies() -> Result<()> {
        let app = test_app();
        run(
            &app.ctx,
            SettingsCommand::Set {
                key: "notifications".to_string(),
                value: "on".to_string(),
            },
        )
        .await?;
        assert_eq!(app.notifier.received()[0].message, "Notifications enabled");
        Ok(())
    }

    #[tokio::test]
    async fn test_reset() -> Result<()> {
        let app = test_app();
        app.ctx.settings.set(Setting::KioskMode(true)).await;
        run(&app.ctx, SettingsCommand::Reset).await?;
        assert_eq!(app.ctx.settings.get().await, Settings::default());
        assert_eq!(app.notifier.received()[0].title, "Info");
        Ok(())
    }
}
