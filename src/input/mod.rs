// SPDX-License-Identifier: GPL-3.0-only

//! Input model: character tables and case state.
//!
//! This module provides the locale-specific character tables (input sets),
//! their per-locale resolution, and the shift/caps case state machine.
//!
//! # Features
//!
//! - **Input sets**: validated, immutable character tables with
//!   neutral/upper/lower variants per key
//! - **Resolution**: per-locale table bundles behind the standard provider
//!   chain, with built-in English base tables
//! - **Case state**: tap/long-press shift transitions, one-shot uppercase,
//!   policy-gated autocapitalization
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use glyphboard::input::{InputSetResolver, CaseState, KeyboardCase};
//! use glyphboard::locale::Locale;
//! use glyphboard::state::KeyboardMode;
//!
//! let mut resolver = InputSetResolver::standard();
//! let set = resolver.input_set(&KeyboardMode::Alphabetic, &Locale::new("en"));
//!
//! let mut case = CaseState::new();
//! case.shift_tapped();
//! let first = set.rows()[0].items()[0].character(case.current());
//! ```

// Sub-modules
pub mod case;
pub mod resolver;
pub mod set;

// Re-export public API
pub use case::{CaseState, KeyboardCase};
pub use resolver::{InputSetResolver, LocaleInputSets};
pub use set::{InputItem, InputRow, InputSet, InputSetError};

// ============================================================================
// Module Tests
// ============================================================================
