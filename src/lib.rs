// SPDX-License-Identifier: GPL-3.0-only

//! Glyphboard - a presentation-and-input core for replaceable on-screen
//! keyboards.
//!
//! Given a locale, device class, and typing mode, this crate produces a
//! precise grid of interactive keys; given raw touch events on those keys,
//! it dispatches the correct text-editing or mode-switching action while
//! keeping shift/caps state, autocomplete, and long-press callouts
//! consistent. Rendering, text-field wiring, haptics, and persistence
//! backends are the host's concern, consumed through the traits in
//! [`session`].
//!
//! # Architecture
//!
//! Context changes flow through resolution into presentation: the input set
//! resolver and provider chains pick the locale's tables, the layout
//! generator sizes them into item rows, and the paginator arranges flat
//! catalogs (emoji, images) into fixed pages. User gestures flow the other
//! way: the dispatcher classifies touches, the session routes them to
//! actions, and a resulting case or mode transition triggers layout
//! regeneration.
//!
//! Everything runs on one logical dispatch thread. The only asynchronous
//! actor is the periodic gesture tick ([`gesture::timer`]); autocomplete
//! replies re-enter the dispatch thread through the session's channel.
//!
//! # Modules
//!
//! - `callout`: long-press alternate-character tables, locale-resolved
//! - `config`: user configuration with JSON persistence
//! - `gesture`: per-touch gesture classification and the tick stream
//! - `input`: input sets, their per-locale resolution, and case state
//! - `layout`: action vocabulary, layout generation, paged grids
//! - `locale`: locale identifiers used as resolution keys
//! - `provider`: the generic locale→service fallback chain
//! - `session`: the per-session object and host collaborator traits
//! - `settings`: centralized tuning constants
//! - `state`: keyboard context (locale, mode, case, device class)

pub mod callout;
pub mod config;
pub mod gesture;
pub mod input;
pub mod layout;
pub mod locale;
pub mod provider;
pub mod session;
pub mod settings;
pub mod state;

// Re-export the session entry points
pub use crate::session::KeyboardSession;

// ============================================================================
// Integration Tests
// ============================================================================
