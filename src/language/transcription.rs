use crate::{errors::Result, models::LanguageCode};
use async_trait::async_trait;
use std::time::Duration;

/// What a transcriber heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    /// Speech as spoken
    pub original: String,
    /// English rendering
    pub translated: String,
    /// Language of `original`
    pub language: LanguageCode,
}

/// Turns recorded audio into text.
#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    /// Transcribes `audio` and translates it to English.
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript>;
}

/// Stand-in transcriber that always "hears" the same saree description.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    delay: Duration,
}

impl MockTranscriber {
    /// Transcriber that waits `delay` before answering.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl SpeechTranscriber for MockTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<Transcript> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!("Mock transcription of {} bytes of audio", audio.len());

        Ok(Transcript {
            original: "सूती साड़ी पारंपरिक डिज़ाइन के साथ".to_string(),
            translated: "Cotton saree with traditional design".to_string(),
            language: LanguageCode::Hi,
        })
    }
}
