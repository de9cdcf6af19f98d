use crate::{errors::Result, models::LanguageCode};
use async_trait::async_trait;
use std::time::Duration;

/// Translates free text between supported languages.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` from `from` into `to`.
    async fn translate(&self, text: &str, from: LanguageCode, to: LanguageCode) -> Result<String>;
}

const KNOWN_PHRASES: [(&str, &str); 5] = [
    ("मैं एक नया उत्पाद जोड़ना चाहता हूं", "I want to add a new product"),
    ("चावल की किस्म बासमती", "basmati rice variety"),
    ("सूती साड़ी", "cotton saree"),
    ("हल्दी पाउडर", "turmeric powder"),
    ("जैविक", "organic"),
];

/// Stand-in translator: a handful of fixed Hindi phrases, everything else is echoed
/// back with a `Translated:` prefix. Waits `delay` first to mimic a remote call.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    delay: Duration,
}

impl MockTranslator {
    /// Translator that waits `delay` before answering.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, from: LanguageCode, to: LanguageCode) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!("Mock translating {from} -> {to}: {text}");

        Ok(KNOWN_PHRASES
            .iter()
            .find(|(source, _)| *source == text)
            .map_or_else(|| format!("Translated: {text}"), |(_, english)| (*english).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_phrase() -> Result<()> {
        let t = MockTranslator::new(Duration::ZERO);
        let out = t
            .translate("चावल की किस्म बासमती", LanguageCode::Hi, LanguageCode::En)
            .await?;
        assert_eq!(out, "basmati rice variety");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_phrase_is_prefixed() -> Result<()> {
        let t = MockTranslator::new(Duration::ZERO);
        let out = t.translate("नमक", LanguageCode::Hi, LanguageCode::En).await?;
        assert_eq!(out, "Translated: नमक");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_delay_elapses() -> Result<()> {
        let t = MockTranslator::default();
        let started = tokio::time::Instant::now();
        t.translate("जैविक", LanguageCode::Hi, LanguageCode::En).await?;
        assert!(started.elapsed() >= Duration::from_millis(500));
        Ok(())
    }
}
