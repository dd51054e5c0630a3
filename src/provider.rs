// SPDX-License-Identifier: GPL-3.0-only

//! Locale-scoped service resolution with guaranteed fallback.
//!
//! A [`StandardProvider`] wraps an ordered locale→service map plus one base
//! service. Resolution walks a fixed chain and never fails:
//!
//! 1. Exact locale match (e.g. `"en-US"`)
//! 2. Language-only match (e.g. `"en"`)
//! 3. A registered dynamic resolver callback, whose result is cached
//!    write-through so each locale is resolved at most once
//! 4. The base service
//!
//! Input-set tables, layout strategies, and callout-action tables all hang
//! off this one mechanism.

use crate::locale::Locale;
use std::collections::HashMap;

/// Callback that can produce a service for a locale on first request.
pub type DynamicResolver<T> = Box<dyn Fn(&Locale) -> Option<T>>;

/// A locale-indexed service registry with fallback resolution.
pub struct StandardProvider<T> {
    /// Service used when no locale-specific entry resolves.
    base: T,

    /// Registered services indexed by exact locale identifier.
    /// Dynamic-resolver results are cached here as well.
    services: HashMap<Locale, T>,

    /// Optional callback consulted before falling back to base.
    dynamic: Option<DynamicResolver<T>>,
}

impl<T> StandardProvider<T> {
    /// Creates a provider with only a base service.
    #[must_use]
    pub fn new(base: T) -> Self {
        Self {
            base,
            services: HashMap::new(),
            dynamic: None,
        }
    }

    /// Registers a locale-specific service.
    ///
    /// Replaces any previous registration for the same locale.
    pub fn register(&mut self, locale: Locale, service: T) {
        self.services.insert(locale, service);
    }

    /// Installs a dynamic resolver consulted on a registry miss.
    ///
    /// The callback runs at most once per locale: a `Some` result is written
    /// through to the registry and served from there on later lookups.
    #[must_use]
    pub fn with_dynamic_resolver(
        mut self,
        resolver: impl Fn(&Locale) -> Option<T> + 'static,
    ) -> Self {
        self.dynamic = Some(Box::new(resolver));
        self
    }

    /// Resolves the service for a locale.
    ///
    /// Walks exact → language-only → dynamic resolver → base and always
    /// returns a service. A resolution miss is recovered here, never
    /// surfaced to the caller.
    pub fn resolve(&mut self, locale: &Locale) -> &T {
        if self.services.contains_key(locale) {
            return &self.services[locale];
        }

        if locale.has_region() {
            let language = locale.language_only();
            if self.services.contains_key(&language) {
                tracing::debug!(
                    "no service for '{}', using language-wide '{}'",
                    locale,
                    language
                );
                return &self.services[&language];
            }
        }

        if let Some(resolver) = &self.dynamic {
            if let Some(service) = resolver(locale) {
                tracing::debug!("dynamically resolved service for '{}'", locale);
                self.services.insert(locale.clone(), service);
                return &self.services[locale];
            }
        }

        tracing::debug!("no service for '{}', using base", locale);
        &self.base
    }

    /// Returns the base service.
    #[must_use]
    pub fn base(&self) -> &T {
        &self.base
    }

    /// Returns `true` if a service is registered (or cached) for the exact
    /// locale.
    #[must_use]
    pub fn has_registration(&self, locale: &Locale) -> bool {
        self.services.contains_key(locale)
    }

    /// Returns the registered locales in no particular order.
    #[must_use]
    pub fn registered_locales(&self) -> Vec<&Locale> {
        self.services.keys().collect()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for StandardProvider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardProvider")
            .field("base", &self.base)
            .field("services", &self.services)
            .field("dynamic", &self.dynamic.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
