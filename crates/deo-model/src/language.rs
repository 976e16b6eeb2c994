//! Narrative languages supported by the document generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unsupported language code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: '{0}' (expected one of en, nl, de, fr, es)")]
pub struct LanguageError(pub String);

/// Closed set of narrative languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Nl,
    De,
    Fr,
    Es,
}

impl Language {
    /// All supported languages
    pub const ALL: [Language; 5] = [Self::En, Self::Nl, Self::De, Self::Fr, Self::Es];

    /// ISO 639-1 code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Nl => "nl",
            Self::De => "de",
            Self::Fr => "fr",
            Self::Es => "es",
        }
    }

    /// English name of the language
    #[must_use]
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Nl => "Dutch",
            Self::De => "German",
            Self::Fr => "French",
            Self::Es => "Spanish",
        }
    }

    /// Name of the language in the language itself
    #[must_use]
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Nl => "Nederlands",
            Self::De => "Deutsch",
            Self::Fr => "Français",
            Self::Es => "Español",
        }
    }

    /// Whether prompts need an explicit language directive
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::En)
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| LanguageError(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_supported_codes() {
        assert_eq!("nl".parse::<Language>().unwrap(), Language::Nl);
        assert_eq!(" DE ".parse::<Language>().unwrap(), Language::De);
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn unsupported_code_is_error() {
        let err = "it".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("unsupported language code"));
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Fr).unwrap(), "\"fr\"");
    }
}
