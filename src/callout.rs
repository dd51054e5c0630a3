// SPDX-License-Identifier: GPL-3.0-only

//! Long-press alternate-character callouts.
//!
//! Holding a character key past the long-press delay surfaces alternate
//! characters (accents, related symbols). The table of alternates is
//! locale-scoped and resolved through the standard provider chain, with a
//! base Latin accent table serving every locale that registers nothing of
//! its own.
//!
//! Lookups are case-aware: a held `"E"` offers `"È"`, `"É"`, … while a held
//! `"e"` offers the lowercase forms.

use crate::layout::types::Action;
use crate::locale::Locale;
use crate::provider::StandardProvider;
use std::collections::HashMap;

/// The alternate-character table for one locale.
#[derive(Debug, Clone, Default)]
pub struct CalloutActions {
    /// Lowercase character → ordered alternates (also lowercase).
    alternates: HashMap<String, Vec<String>>,
}

impl CalloutActions {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds alternates for a character, replacing any previous entry.
    ///
    /// The character and its alternates are stored lowercase; lookups
    /// restore the pressed key's casing.
    #[must_use]
    pub fn with(mut self, character: &str, alternates: &[&str]) -> Self {
        self.alternates.insert(
            character.to_lowercase(),
            alternates.iter().map(|a| a.to_lowercase()).collect(),
        );
        self
    }

    /// The base Latin accent table.
    #[must_use]
    pub fn base_latin() -> Self {
        Self::new()
            .with("a", &["à", "á", "â", "ä", "æ", "ã", "å", "ā"])
            .with("c", &["ç", "ć", "č"])
            .with("e", &["è", "é", "ê", "ë", "ē", "ė", "ę"])
            .with("i", &["ì", "í", "î", "ï", "ī", "į"])
            .with("l", &["ł"])
            .with("n", &["ñ", "ń"])
            .with("o", &["ò", "ó", "ô", "ö", "œ", "ø", "ō", "õ"])
            .with("s", &["ß", "ś", "š"])
            .with("u", &["ù", "ú", "û", "ü", "ū"])
            .with("y", &["ÿ"])
            .with("z", &["ž", "ź", "ż"])
    }

    /// Returns the callout actions for a key's action.
    ///
    /// Only character actions have callouts; anything else (and any
    /// character without an entry) yields an empty list.
    #[must_use]
    pub fn actions_for(&self, action: &Action) -> Vec<Action> {
        let Action::Character(character) = action else {
            return Vec::new();
        };

        let lookup = character.to_lowercase();
        let Some(alternates) = self.alternates.get(&lookup) else {
            return Vec::new();
        };

        let uppercased = *character != lookup;
        alternates
            .iter()
            .map(|alternate| {
                let cased = if uppercased {
                    alternate.to_uppercase()
                } else {
                    alternate.clone()
                };
                Action::Character(cased)
            })
            .collect()
    }
}

/// Resolves callout tables per locale with guaranteed fallback.
#[derive(Debug)]
pub struct CalloutResolver {
    provider: StandardProvider<CalloutActions>,
}

impl CalloutResolver {
    /// Creates a resolver with the given base table.
    #[must_use]
    pub fn new(base: CalloutActions) -> Self {
        Self {
            provider: StandardProvider::new(base),
        }
    }

    /// Creates a resolver with the base Latin accent table.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CalloutActions::base_latin())
    }

    /// Registers a locale-specific table.
    pub fn register(&mut self, locale: Locale, actions: CalloutActions) {
        self.provider.register(locale, actions);
    }

    /// Installs a dynamic resolver for locales not registered up front.
    #[must_use]
    pub fn with_dynamic_resolver(
        mut self,
        resolver: impl Fn(&Locale) -> Option<CalloutActions> + 'static,
    ) -> Self {
        self.provider = self.provider.with_dynamic_resolver(resolver);
        self
    }

    /// Resolves the callout actions for an action in a locale. Never fails;
    /// unknown locales fall back to the base table.
    pub fn callout_actions(&mut self, locale: &Locale, action: &Action) -> Vec<Action> {
        self.provider.resolve(locale).actions_for(action)
    }
}

impl Default for CalloutResolver {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
