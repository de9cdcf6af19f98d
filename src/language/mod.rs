//! Language services - script-based detection plus pluggable translation and
//! speech transcription.
//!
//! Only mock translators and transcribers ship with the crate. Real engines plug in by
//! implementing [`Translator`] or [`SpeechTranscriber`]; nothing in the catalog or
//! settings code depends on them.

mod detection;
mod transcription;
mod translation;

pub use detection::{Detection, detect_language};
pub use transcription::{MockTranscriber, SpeechTranscriber, Transcript};
pub use translation::{MockTranslator, Translator};

use crate::{errors::Result, models::LanguageCode};

/// Result of turning free text into the two provenance fields of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct InputInterpretation {
    /// Detection result, when auto-detection ran
    pub detection: Option<Detection>,
    /// Language the input was treated as
    pub language: LanguageCode,
    /// Input as given
    pub local_input: String,
    /// English rendering of the input
    pub translated_input: String,
}

/// Works out the language of `text` and translates it to English.
///
/// With `auto_detect` off, `fallback` is used as the input language. English input is
/// passed through untranslated.
///
/// # Errors
/// Returns whatever error the translator reports.
pub async fn interpret_input(
    text: &str,
    translator: &dyn Translator,
    fallback: LanguageCode,
    auto_detect: bool,
) -> Result<InputInterpretation> {
    let detection = auto_detect.then(|| detect_language(text));
    let language = detection.as_ref().map_or(fallback, |d| d.language);

    let translated_input = if language == LanguageCode::En {
        text.to_string()
    } else {
        translator.translate(text, language, LanguageCode::En).await?
    };

    Ok(InputInterpretation {
        detection,
        language,
        local_input: text.to_string(),
        translated_input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_interpret_hindi_input() -> Result<()> {
        let translator = MockTranslator::new(Duration::ZERO);
        let result = interpret_input("हल्दी पाउडर", &translator, LanguageCode::En, true).await?;
        assert_eq!(result.language, LanguageCode::Hi);
        assert_eq!(result.local_input, "हल्दी पाउडर");
        assert_eq!(result.translated_input, "turmeric powder");
        assert!(result.detection.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_english_input_is_not_translated() -> Result<()> {
        let translator = MockTranslator::new(Duration::ZERO);
        let result =
            interpret_input("blue cotton shirt", &translator, LanguageCode::Hi, true).await?;
        assert_eq!(result.language, LanguageCode::En);
        assert_eq!(result.translated_input, "blue cotton shirt");
        Ok(())
    }

    #[tokio::test]
    async fn test_fallback_language_without_auto_detect() -> Result<()> {
        let translator = MockTranslator::new(Duration::ZERO);
        let result = interpret_input("sooti saree", &translator, LanguageCode::Hi, false).await?;
        assert!(result.detection.is_none());
        assert_eq!(result.language, LanguageCode::Hi);
        assert_eq!(result.translated_input, "Translated: sooti saree");
        Ok(())
    }
}
