// SPDX-License-Identifier: GPL-3.0-only

//! Locale identifiers used as resolution keys.
//!
//! A [`Locale`] is a lowercase ISO 639 language code plus an optional
//! uppercase ISO 3166 region, parsed permissively from forms like `"en-US"`,
//! `"en_US"`, or `"sv"`. Every provider chain in the crate is indexed by
//! these values, with the region-less form serving as the language-wide
//! fallback key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A locale resolution key: language plus optional region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    /// Lowercase ISO 639 language code (e.g. "en", "sv").
    language: String,

    /// Uppercase ISO 3166 region code (e.g. "US", "SE"), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
}

impl Locale {
    /// Creates a region-less locale from a language code.
    ///
    /// The language is normalized to lowercase.
    #[must_use]
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: None,
        }
    }

    /// Creates a locale with both language and region.
    ///
    /// The language is normalized to lowercase, the region to uppercase.
    #[must_use]
    pub fn with_region(language: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: Some(region.into().to_uppercase()),
        }
    }

    /// Parses a locale from an identifier string.
    ///
    /// Accepts `"en"`, `"en-US"` and `"en_US"` forms. Case is normalized.
    /// Returns `None` for empty or structurally invalid identifiers; callers
    /// fall back rather than fail (resolution must never surface a miss).
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut parts = trimmed.splitn(2, ['-', '_']);
        let language = parts.next()?.trim();
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        match parts.next() {
            Some(region) => {
                let region = region.trim();
                if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return None;
                }
                Some(Self::with_region(language, region))
            }
            None => Some(Self::new(language)),
        }
    }

    /// Returns the language code.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the region code, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns `true` if this locale carries a region.
    #[must_use]
    pub fn has_region(&self) -> bool {
        self.region.is_some()
    }

    /// Returns the region-less form of this locale.
    ///
    /// Used as the second step of provider fallback: an exact
    /// `"en-US"` miss retries as `"en"` before consulting the base service.
    #[must_use]
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Parsing accepts both separator styles and normalizes case.
    #[test]
    fn test_parse_normalizes_case_and_separators() {
        let dash = Locale::parse("EN-us").expect("should parse dash form");
        assert_eq!(dash.language(), "en");
        assert_eq!(dash.region(), Some("US"));

        let underscore = Locale::parse("sv_se").expect("should parse underscore form");
        assert_eq!(underscore, Locale::with_region("sv", "SE"));

        let bare = Locale::parse("De").expect("should parse bare language");
        assert_eq!(bare, Locale::new("de"));
        assert!(!bare.has_region());
    }

    /// Invalid identifiers return None instead of panicking.
    #[test]
    fn test_parse_rejects_invalid_identifiers() {
        assert_eq!(Locale::parse(""), None, "empty string should not parse");
        assert_eq!(Locale::parse("   "), None, "whitespace should not parse");
        assert_eq!(Locale::parse("en-"), None, "empty region should not parse");
        assert_eq!(
            Locale::parse("e!n"),
            None,
            "non-alphabetic language should not parse"
        );
    }

    /// Display round-trips through parse.
    #[test]
    fn test_display_round_trip() {
        for identifier in ["en", "en-US", "pt-BR", "zh-Hans"] {
            let locale = Locale::parse(identifier).expect("should parse");
            let rendered = locale.to_string();
            assert_eq!(
                Locale::parse(&rendered),
                Some(locale),
                "display form '{}' should parse back to the same locale",
                rendered
            );
        }
    }

    /// language_only strips the region but keeps the language.
    #[test]
    fn test_language_only_fallback_form() {
        let full = Locale::with_region("en", "GB");
        let fallback = full.language_only();

        assert_eq!(fallback, Locale::new("en"));
        assert!(!fallback.has_region());
        // The full form is untouched.
        assert_eq!(full.region(), Some("GB"));
    }
}
