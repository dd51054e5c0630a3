// SPDX-License-Identifier: GPL-3.0-only

//! Per-locale input set resolution.
//!
//! A [`LocaleInputSets`] bundle holds the alphabetic, numeric, and symbolic
//! character tables for one locale. The [`InputSetResolver`] indexes bundles
//! by locale through the standard provider chain, so an unregistered locale
//! always falls back to the base (English QWERTY) tables rather than
//! failing.
//!
//! Bundles can also be loaded from JSON definition files:
//!
//! ```json
//! {
//!   "alphabetic": [["q","w","e"], ["a","s","d"]],
//!   "numeric":    [["1","2","3"]],
//!   "symbolic":   [["#","%","&"]]
//! }
//! ```
//!
//! Each entry is one key: single letters get derived case variants, anything
//! else is an uncased symbol.

use crate::input::set::{InputItem, InputRow, InputSet, InputSetError};
use crate::locale::Locale;
use crate::provider::StandardProvider;
use crate::state::KeyboardMode;
use serde::Deserialize;

/// The character tables for one locale, one per non-paged mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInputSets {
    alphabetic: InputSet,
    numeric: InputSet,
    symbolic: InputSet,
}

impl LocaleInputSets {
    /// Creates a bundle from pre-validated sets.
    #[must_use]
    pub fn new(alphabetic: InputSet, numeric: InputSet, symbolic: InputSet) -> Self {
        Self {
            alphabetic,
            numeric,
            symbolic,
        }
    }

    /// The built-in English tables: QWERTY letters, phone-style numeric and
    /// symbolic rows.
    #[must_use]
    pub fn english() -> Self {
        Self {
            alphabetic: InputSet::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"])
                .expect("built-in alphabetic table is valid"),
            numeric: InputSet::from_rows(&["1234567890", "-/:;()$&@\"", ".,?!'"])
                .expect("built-in numeric table is valid"),
            symbolic: InputSet::from_rows(&["[]{}#%^*+=", "_\\|~<>$€£¥", ".,?!'"])
                .expect("built-in symbolic table is valid"),
        }
    }

    /// Selects the table for a keyboard mode.
    ///
    /// Paged and custom modes resolve to the alphabetic table so that
    /// resolution never comes up empty; their grids are produced by the
    /// paginator, not from an input set.
    #[must_use]
    pub fn set_for(&self, mode: &KeyboardMode) -> &InputSet {
        match mode {
            KeyboardMode::Numeric => &self.numeric,
            KeyboardMode::Symbolic => &self.symbolic,
            KeyboardMode::Alphabetic
            | KeyboardMode::Emoji
            | KeyboardMode::Images
            | KeyboardMode::Custom(_) => &self.alphabetic,
        }
    }

    /// Loads a bundle from a JSON definition string.
    ///
    /// Validation runs on every table; a malformed definition is reported
    /// with row/item context, never silently accepted.
    pub fn from_json_str(json: &str) -> Result<Self, InputSetError> {
        let raw: RawTables = serde_json::from_str(json)?;
        Ok(Self {
            alphabetic: build_set(raw.alphabetic)?,
            numeric: build_set(raw.numeric)?,
            symbolic: build_set(raw.symbolic)?,
        })
    }
}

impl Default for LocaleInputSets {
    fn default() -> Self {
        Self::english()
    }
}

/// Raw JSON shape of a locale's table definition.
#[derive(Debug, Deserialize)]
struct RawTables {
    alphabetic: Vec<Vec<String>>,
    numeric: Vec<Vec<String>>,
    symbolic: Vec<Vec<String>>,
}

fn build_set(rows: Vec<Vec<String>>) -> Result<InputSet, InputSetError> {
    let rows = rows
        .into_iter()
        .map(|row| {
            InputRow::new(
                row.into_iter()
                    .map(|entry| {
                        let mut chars = entry.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) if c.is_alphabetic() => InputItem::from_char(c),
                            _ => InputItem::symbol(entry),
                        }
                    })
                    .collect(),
            )
        })
        .collect();
    InputSet::new(rows)
}

/// Resolves input sets per (mode, locale) with guaranteed fallback.
#[derive(Debug)]
pub struct InputSetResolver {
    provider: StandardProvider<LocaleInputSets>,
}

impl InputSetResolver {
    /// Creates a resolver with the given base bundle.
    #[must_use]
    pub fn new(base: LocaleInputSets) -> Self {
        Self {
            provider: StandardProvider::new(base),
        }
    }

    /// Creates a resolver with the built-in English base tables.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(LocaleInputSets::english())
    }

    /// Registers a locale-specific bundle.
    pub fn register(&mut self, locale: Locale, sets: LocaleInputSets) {
        self.provider.register(locale, sets);
    }

    /// Installs a dynamic resolver for locales not registered up front.
    #[must_use]
    pub fn with_dynamic_resolver(
        mut self,
        resolver: impl Fn(&Locale) -> Option<LocaleInputSets> + 'static,
    ) -> Self {
        self.provider = self.provider.with_dynamic_resolver(resolver);
        self
    }

    /// Resolves the input set for a mode and locale. Never fails.
    pub fn input_set(&mut self, mode: &KeyboardMode, locale: &Locale) -> &InputSet {
        self.provider.resolve(locale).set_for(mode)
    }
}

impl Default for InputSetResolver {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
