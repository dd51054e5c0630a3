// SPDX-License-Identifier: GPL-3.0-only

//! Session-scoped keyboard context.
//!
//! A [`KeyboardContext`] is constructed once per keyboard session and
//! threaded through every call; there is no shared global "current
//! keyboard". It holds the mutable facts layout generation depends on: the
//! active locale, the typing mode, the case state machine, and the device
//! class. Layouts and pages are recomputed from it, never cached inside it.

use crate::input::case::CaseState;
use crate::locale::Locale;
use crate::settings;
use serde::{Deserialize, Serialize};

/// The keyboard's current typing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyboardMode {
    /// Letter keys for the active locale.
    #[default]
    Alphabetic,
    /// Digits and common punctuation.
    Numeric,
    /// Extended symbols.
    Symbolic,
    /// Paged emoji catalog.
    Emoji,
    /// Paged image catalog.
    Images,
    /// A host-defined mode identified by name.
    Custom(String),
}

impl KeyboardMode {
    /// Returns `true` for modes presented as a paged grid instead of
    /// character rows.
    #[must_use]
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Emoji | Self::Images)
    }
}

/// Device class, selecting row-height constants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    /// Phone-sized devices.
    #[default]
    Phone,
    /// Tablet-sized devices.
    Tablet,
}

impl DeviceClass {
    /// Returns the key row height in points for this device class.
    #[must_use]
    pub fn row_height(self) -> f32 {
        match self {
            Self::Phone => settings::PHONE_ROW_HEIGHT,
            Self::Tablet => settings::TABLET_ROW_HEIGHT,
        }
    }
}

/// Mutable per-session keyboard state.
#[derive(Debug, Clone, Default)]
pub struct KeyboardContext {
    /// The active locale, used as the resolution key everywhere.
    pub locale: Locale,
    /// The active typing mode.
    pub mode: KeyboardMode,
    /// The shift/caps state machine.
    pub case: CaseState,
    /// The device class this session renders on.
    pub device_class: DeviceClass,
}

impl KeyboardContext {
    /// Creates a context for a locale and device class, starting in
    /// alphabetic mode with automatic casing.
    #[must_use]
    pub fn new(locale: Locale, device_class: DeviceClass) -> Self {
        Self {
            locale,
            mode: KeyboardMode::Alphabetic,
            case: CaseState::new(),
            device_class,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
