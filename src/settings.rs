// SPDX-License-Identifier: GPL-3.0-only

//! Centralized keyboard tuning constants.

/// A key press that exceeds this duration triggers long press behavior,
/// such as showing alternate-character callouts or caps-locking shift.
pub const LONG_PRESS_DELAY_MS: u64 = 500;

/// Interval between repeat firings for repeatable keys (e.g. backspace),
/// once the long-press delay has elapsed.
pub const REPEAT_INTERVAL_MS: u64 = 100;

/// A second tap on the same key within this window also fires a double tap.
pub const DOUBLE_TAP_WINDOW_MS: u64 = 300;

/// Timer tick interval for gesture deadline checking in milliseconds.
///
/// The gesture tick stream emits at this interval so long-press and repeat
/// deadlines can be polled on the dispatch thread.
pub const GESTURE_TICK_INTERVAL_MS: u64 = 50;

/// Key row height in points on phone-class devices.
pub const PHONE_ROW_HEIGHT: f32 = 54.0;

/// Key row height in points on tablet-class devices.
pub const TABLET_ROW_HEIGHT: f32 = 66.0;

/// Standard edge inset around a visible key, in points.
pub const STANDARD_KEY_INSET: f32 = 3.0;

/// Default number of actions per page in paged grids (emoji, images).
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Default number of rows per page in paged grids.
pub const DEFAULT_ROWS_PER_PAGE: usize = 4;
