// SPDX-License-Identifier: GPL-3.0-only

//! Shift and caps-lock state management.
//!
//! This module tracks the keyboard's current case and its transition rules:
//!
//! - **Tap shift**: toggles between lowercase and uppercase. Caps lock is
//!   never reached by tapping.
//! - **Long-press shift**: engages caps lock from any state.
//! - **One-shot uppercase**: typing a character while uppercased (but not
//!   caps-locked) reverts to lowercase after the insertion.
//! - **Autocase**: an external text-context signal may request a preferred
//!   case; it is applied only when the behavior policy allows it at that
//!   moment (never mid-word).
//!
//! Every method that can change state reports whether it did, so the caller
//! knows to regenerate the layout.

use serde::{Deserialize, Serialize};

/// The keyboard's current shift/caps state.
///
/// `Auto` behaves like lowercase for character selection but marks that the
/// case is under automatic control rather than a user override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardCase {
    /// Case is automatically managed (e.g. sentence auto-capitalization).
    #[default]
    Auto,
    /// Explicitly lowercased.
    Lowercased,
    /// Uppercased for the next character only (one-shot shift).
    Uppercased,
    /// Uppercased until caps lock is released.
    CapsLocked,
}

impl KeyboardCase {
    /// Returns `true` if characters should render in their upper variant.
    #[must_use]
    pub fn is_uppercased(self) -> bool {
        matches!(self, Self::Uppercased | Self::CapsLocked)
    }

    /// Returns `true` if caps lock is engaged.
    #[must_use]
    pub fn is_caps_locked(self) -> bool {
        self == Self::CapsLocked
    }
}

/// The case state machine.
///
/// State changes only through the explicit transition methods below, except
/// for the direct programmatic override [`CaseState::set`].
#[derive(Debug, Clone, Default)]
pub struct CaseState {
    current: KeyboardCase,
}

impl CaseState {
    /// Creates a state machine starting in `Auto`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current case.
    #[must_use]
    pub fn current(&self) -> KeyboardCase {
        self.current
    }

    /// Directly overrides the current case.
    pub fn set(&mut self, case: KeyboardCase) {
        self.current = case;
    }

    /// Applies a shift tap.
    ///
    /// Lowercased becomes uppercased; uppercased, auto, and caps-locked all
    /// become lowercased. Returns `true` (a tap always changes state), so
    /// the caller regenerates the layout.
    pub fn shift_tapped(&mut self) -> bool {
        let next = match self.current {
            KeyboardCase::Lowercased => KeyboardCase::Uppercased,
            KeyboardCase::Auto | KeyboardCase::Uppercased | KeyboardCase::CapsLocked => {
                KeyboardCase::Lowercased
            }
        };
        self.transition(next)
    }

    /// Applies a shift long-press: caps lock, from any state.
    pub fn shift_long_pressed(&mut self) -> bool {
        self.transition(KeyboardCase::CapsLocked)
    }

    /// Records that a character was typed.
    ///
    /// Releases one-shot uppercase: `Uppercased` reverts to `Lowercased`
    /// after the insertion. Caps lock is unaffected.
    pub fn character_typed(&mut self) -> bool {
        if self.current == KeyboardCase::Uppercased {
            self.transition(KeyboardCase::Lowercased)
        } else {
            false
        }
    }

    /// Handles an external text-context change requesting a preferred case.
    ///
    /// The switch is applied only when `allowed`, the caller's behavior
    /// policy, typically "autocapitalization enabled and not mid-word".
    pub fn request_preferred(&mut self, preferred: KeyboardCase, allowed: bool) -> bool {
        if !allowed {
            tracing::debug!("autocase to {:?} blocked by policy", preferred);
            return false;
        }
        self.transition(preferred)
    }

    fn transition(&mut self, next: KeyboardCase) -> bool {
        if self.current == next {
            return false;
        }
        tracing::debug!("case transition {:?} -> {:?}", self.current, next);
        self.current = next;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================
