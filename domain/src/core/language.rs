//! Supported reply languages.
//!
//! Every answer is rendered in exactly one of three languages. Anything the
//! caller or the model hands us that is not one of these collapses to
//! [`Language::EnUs`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of languages the assistant answers in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "ro_RO")]
    RoRo,
    #[serde(rename = "hu_HU")]
    HuHu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::EnUs, Language::RoRo, Language::HuHu];

    /// Locale code, e.g. `ro_RO`
    pub fn code(&self) -> &'static str {
        match self {
            Language::EnUs => "en_US",
            Language::RoRo => "ro_RO",
            Language::HuHu => "hu_HU",
        }
    }

    /// Human-readable English name used inside prompts
    pub fn name(&self) -> &'static str {
        match self {
            Language::EnUs => "English",
            Language::RoRo => "Romanian",
            Language::HuHu => "Hungarian",
        }
    }

    /// Field suffix used by the search index (`name_ro`, `description_hu`, ...)
    pub fn suffix(&self) -> &'static str {
        match self {
            Language::EnUs => "en",
            Language::RoRo => "ro",
            Language::HuHu => "hu",
        }
    }

    /// Exact lookup of a locale code
    pub fn from_code(code: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Validate a caller-supplied code, falling back to `en_US`
    pub fn parse_or_default(code: &str) -> Language {
        Self::from_code(code.trim()).unwrap_or_default()
    }

    /// Interpret the free-text answer of a language detection round-trip.
    ///
    /// Checked in order: full locale codes, language names, then standalone
    /// two-letter codes. Nothing recognisable means English.
    pub fn parse_detection_response(response: &str) -> Language {
        let upper = response.trim().to_uppercase();
        if upper.is_empty() {
            return Language::EnUs;
        }

        if upper.contains("RO_RO") || upper.contains("RO-RO") {
            return Language::RoRo;
        }
        if upper.contains("HU_HU") || upper.contains("HU-HU") {
            return Language::HuHu;
        }
        if upper.contains("EN_US") || upper.contains("EN-US") {
            return Language::EnUs;
        }

        let contains_any = |words: &[&str]| words.iter().any(|w| upper.contains(w));
        if contains_any(&["ROMANIAN", "ROMÂNĂ", "ROMANIA"]) {
            return Language::RoRo;
        }
        if contains_any(&["HUNGARIAN", "MAGYAR", "HUNGARY"]) {
            return Language::HuHu;
        }
        if contains_any(&["ENGLISH", "ENGLAND"]) {
            return Language::EnUs;
        }

        let has_word = |word: &str| {
            upper
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == word)
        };
        if has_word("RO") {
            Language::RoRo
        } else if has_word("HU") {
            Language::HuHu
        } else {
            Language::EnUs
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_supported() {
        assert_eq!(Language::parse_or_default("ro_RO"), Language::RoRo);
        assert_eq!(Language::parse_or_default("hu_HU"), Language::HuHu);
        assert_eq!(Language::parse_or_default("en_US"), Language::EnUs);
    }

    #[test]
    fn test_parse_or_default_unsupported_falls_back() {
        assert_eq!(Language::parse_or_default("fr_FR"), Language::EnUs);
        assert_eq!(Language::parse_or_default(""), Language::EnUs);
        assert_eq!(Language::parse_or_default("ro"), Language::EnUs);
    }

    #[test]
    fn test_detection_exact_codes() {
        assert_eq!(Language::parse_detection_response("ro_RO"), Language::RoRo);
        assert_eq!(Language::parse_detection_response("  hu-hu\n"), Language::HuHu);
        assert_eq!(
            Language::parse_detection_response("LANGUAGE_CODE: en_US"),
            Language::EnUs
        );
    }

    #[test]
    fn test_detection_language_names() {
        assert_eq!(
            Language::parse_detection_response("The text is Romanian."),
            Language::RoRo
        );
        assert_eq!(Language::parse_detection_response("magyar"), Language::HuHu);
        assert_eq!(Language::parse_detection_response("română"), Language::RoRo);
    }

    #[test]
    fn test_detection_standalone_codes() {
        assert_eq!(Language::parse_detection_response("RO"), Language::RoRo);
        assert_eq!(Language::parse_detection_response("answer: hu."), Language::HuHu);
        // "ROBOT" must not count as a standalone RO
        assert_eq!(Language::parse_detection_response("ROBOT"), Language::EnUs);
    }

    #[test]
    fn test_detection_garbage_is_english() {
        assert_eq!(Language::parse_detection_response(""), Language::EnUs);
        assert_eq!(Language::parse_detection_response("Bonjour!"), Language::EnUs);
    }

    #[test]
    fn test_serde_uses_locale_codes() {
        let json = serde_json::to_string(&Language::HuHu).unwrap();
        assert_eq!(json, "\"hu_HU\"");
        let lang: Language = serde_json::from_str("\"ro_RO\"").unwrap();
        assert_eq!(lang, Language::RoRo);
    }

    #[test]
    fn test_suffix_and_name() {
        assert_eq!(Language::RoRo.suffix(), "ro");
        assert_eq!(Language::HuHu.name(), "Hungarian");
        assert_eq!(Language::EnUs.to_string(), "en_US");
    }
}
