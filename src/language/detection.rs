use crate::models::LanguageCode;
use std::ops::RangeInclusive;

/// Outcome of [`detect_language`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Best guess
    pub language: LanguageCode,
    /// In [0, 0.95]
    pub confidence: f64,
    /// English display name of `language`
    pub language_name: &'static str,
}

impl Detection {
    fn new(language: LanguageCode, confidence: f64) -> Self {
        Self {
            language,
            confidence,
            language_name: language.name(),
        }
    }
}

// Checked in order; Marathi shares Devanagari with Hindi and is never reached.
const SCRIPTS: [(LanguageCode, RangeInclusive<char>); 9] = [
    (LanguageCode::Hi, '\u{0900}'..='\u{097F}'),
    (LanguageCode::Ta, '\u{0B80}'..='\u{0BFF}'),
    (LanguageCode::Te, '\u{0C00}'..='\u{0C7F}'),
    (LanguageCode::Bn, '\u{0980}'..='\u{09FF}'),
    (LanguageCode::Mr, '\u{0900}'..='\u{097F}'),
    (LanguageCode::Gu, '\u{0A80}'..='\u{0AFF}'),
    (LanguageCode::Kn, '\u{0C80}'..='\u{0CFF}'),
    (LanguageCode::Ml, '\u{0D00}'..='\u{0D7F}'),
    (LanguageCode::Pa, '\u{0A00}'..='\u{0A7F}'),
];

/// Guesses the language of `text` from the Unicode block of its characters.
///
/// Blank text is English with zero confidence. Text with no Indic script characters is
/// English at 0.5. Otherwise the first matching script wins, with confidence
/// `0.7 + 0.25 / len` capped at 0.95, `len` being the length of `text` in characters.
#[must_use]
pub fn detect_language(text: &str) -> Detection {
    if text.trim().is_empty() {
        return Detection::new(LanguageCode::En, 0.0);
    }

    SCRIPTS
        .iter()
        .find(|(_, range)| text.chars().any(|c| range.contains(&c)))
        .map_or_else(
            || Detection::new(LanguageCode::En, 0.5),
            |(language, _)| {
                #[allow(clippy::cast_precision_loss)]
                let len = text.chars().count() as f64;
                Detection::new(*language, (0.7 + 0.25 / len).min(0.95))
            },
        )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_blank_text_is_english_with_no_confidence() {
        let d = detect_language("   ");
        assert_eq!(d.language, LanguageCode::En);
        assert_eq!(d.confidence, 0.0);
        assert_eq!(d.language_name, "English");
    }

    #[test]
    fn test_latin_text_is_english() {
        let d = detect_language("cotton saree");
        assert_eq!(d.language, LanguageCode::En);
        assert_eq!(d.confidence, 0.5);
    }

    #[test]
    fn test_scripts() {
        assert_eq!(detect_language("सूती साड़ी").language, LanguageCode::Hi);
        assert_eq!(detect_language("மஞ்சள்").language, LanguageCode::Ta);
        assert_eq!(detect_language("పసుపు").language, LanguageCode::Te);
        assert_eq!(detect_language("হলুদ").language, LanguageCode::Bn);
        assert_eq!(detect_language("હળદર").language, LanguageCode::Gu);
        assert_eq!(detect_language("ಅರಿಶಿನ").language, LanguageCode::Kn);
        assert_eq!(detect_language("മഞ്ഞൾ").language, LanguageCode::Ml);
        assert_eq!(detect_language("ਹਲਦੀ").language, LanguageCode::Pa);
    }

    #[test]
    fn test_marathi_is_reported_as_hindi() {
        assert_eq!(detect_language("हळद").language, LanguageCode::Hi);
    }

    #[test]
    fn test_confidence_formula() {
        // single character: 0.7 + 0.25 capped
        assert_eq!(detect_language("क").confidence, 0.95);
        // 11 characters including the space and digits
        let d = detect_language("हल्दी 12345");
        assert!((d.confidence - (0.7 + 0.25 / 11.0)).abs() < 1e-9);
        assert_eq!(d.language_name, "Hindi");
    }
}
