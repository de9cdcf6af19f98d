use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language the voice and text input can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// Hindi
    Hi,
    /// English
    En,
    /// Tamil
    Ta,
    /// Telugu
    Te,
    /// Bengali
    Bn,
    /// Marathi
    Mr,
    /// Gujarati
    Gu,
    /// Kannada
    Kn,
    /// Malayalam
    Ml,
    /// Punjabi
    Pa,
}

impl LanguageCode {
    /// Every supported language, in picker order.
    pub const ALL: [Self; 10] = [
        Self::Hi,
        Self::En,
        Self::Ta,
        Self::Te,
        Self::Bn,
        Self::Mr,
        Self::Gu,
        Self::Kn,
        Self::Ml,
        Self::Pa,
    ];

    /// Two-letter code as persisted
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hi => "hi",
            Self::En => "en",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Bn => "bn",
            Self::Mr => "mr",
            Self::Gu => "gu",
            Self::Kn => "kn",
            Self::Ml => "ml",
            Self::Pa => "pa",
        }
    }

    /// English display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hi => "Hindi",
            Self::En => "English",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Bn => "Bengali",
            Self::Mr => "Marathi",
            Self::Gu => "Gujarati",
            Self::Kn => "Kannada",
            Self::Ml => "Malayalam",
            Self::Pa => "Punjabi",
        }
    }

    /// Name in the language's own script
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Hi => "हिंदी",
            Self::En => "English",
            Self::Ta => "தமிழ்",
            Self::Te => "తెలుగు",
            Self::Bn => "বাংলা",
            Self::Mr => "मराठी",
            Self::Gu => "ગુજરાતી",
            Self::Kn => "ಕನ್ನಡ",
            Self::Ml => "മലയാളം",
            Self::Pa => "ਪੰਜਾਬੀ",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == wanted)
            .ok_or_else(|| Error::InvalidInput {
                message: format!("Unsupported language code `{s}`"),
            })
    }
}
