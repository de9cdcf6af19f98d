//! Language tools - supported languages, detection and translation.

use crate::{
    cli::AppContext,
    errors::Result,
    language::detect_language,
    models::LanguageCode,
    notifications::Notification,
};
use clap::Subcommand;
use std::fmt::Write as _;

/// Language subcommands, available at the top level
#[derive(Debug, Subcommand)]
pub enum LanguageCommand {
    /// List supported languages
    Languages,
    /// Detect the language of some text
    Detect {
        /// Text in any supported language
        text: String,
    },
    /// Translate text to English
    Translate {
        /// Text to translate
        text: String,
        /// Source language code; detected when omitted
        #[arg(long)]
        from: Option<LanguageCode>,
    },
}

/// Executes a language subcommand.
///
/// # Errors
/// Returns an error when the translator fails.
pub async fn run(ctx: &AppContext, command: LanguageCommand) -> Result<String> {
    match command {
        LanguageCommand::Languages => {
            let mut out = String::from("Supported languages:\n");
            for lang in LanguageCode::ALL {
                let _ = writeln!(
                    out,
                    "  {}  {} ({})",
                    lang.code(),
                    lang.name(),
                    lang.native_name()
                );
            }
            Ok(out)
        }
        LanguageCommand::Detect { text } => {
            let detection = detect_language(&text);
            if !text.trim().is_empty() {
                ctx.notifier.notify(Notification::language_detected(
                    detection.language,
                    detection.confidence,
                ));
            }
            Ok(format!(
                "{} ({}) · confidence {:.0}%",
                detection.language_name,
                detection.language,
                (detection.confidence * 100.0).round()
            ))
        }
        LanguageCommand::Translate { text, from } => {
            let from = from.unwrap_or_else(|| detect_language(&text).language);
            if from == LanguageCode::En {
                return Ok(text);
            }
            ctx.translator.translate(&text, from, LanguageCode::En).await
        }
    }
}
