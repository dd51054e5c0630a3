// SPDX-License-Identifier: GPL-3.0-only

//! Gesture classification and timing.
//!
//! This module turns raw touch events into classified gestures (tap,
//! double tap, long press, repeat, drag) and provides the periodic tick
//! stream that drives deadline polling.
//!
//! # Event Guarantees
//!
//! - `Press` fires on every touch-down.
//! - Exactly one of `Tap` / `LongPress` paths runs per press; a tap can
//!   extend into a `DoubleTap` within the configured window.
//! - `Repeat` fires only for repeatable actions, only after the long-press
//!   delay, at a fixed interval until release.
//! - `End` fires exactly once per gesture on every path (release,
//!   cancellation, or a stale press being replaced) and is the sole event
//!   guaranteed to stop that press's timers.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use glyphboard::gesture::{timer, GestureDispatcher, Point, Rect};
//! use futures::StreamExt;
//! use std::time::Instant;
//!
//! let mut dispatcher = GestureDispatcher::default();
//! let mut ticks = Box::pin(timer::gesture_ticks());
//!
//! // On the dispatch loop: interleave touch events with deadline polls.
//! while let Some(now) = ticks.next().await {
//!     for event in dispatcher.poll(now) {
//!         session.handle(event.gesture, &event.action);
//!     }
//! }
//! ```

// Sub-modules
pub mod dispatcher;
pub mod timer;

// Re-export public API
pub use dispatcher::{Gesture, GestureDispatcher, GestureEvent, GestureTiming, Point, Rect};

// ============================================================================
// Module Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Action;
    use futures::StreamExt;
    use std::time::{Duration, Instant};

    /// The tick stream drives dispatcher deadlines end to end: a held
    /// backspace long-presses and repeats under tick polling alone.
    #[tokio::test(start_paused = true)]
    async fn test_ticks_drive_deadline_polling() {
        let timing = GestureTiming {
            long_press_delay: Duration::from_millis(100),
            repeat_interval: Duration::from_millis(100),
            double_tap_window: Duration::from_millis(300),
        };
        let mut dispatcher = GestureDispatcher::new(timing);
        let mut ticks = Box::pin(timer::ticks(Duration::from_millis(50)));

        let start = Instant::now();
        dispatcher.touch_down(
            &Action::Backspace,
            Rect::new(0.0, 0.0, 40.0, 50.0),
            Point::new(5.0, 5.0),
            start,
        );

        // The paused clock makes the awaits instant; the dispatcher sees a
        // deterministic 50 ms of progress per tick.
        let mut long_presses = 0;
        let mut repeats = 0;
        for tick in 1..=8u64 {
            ticks.next().await.expect("tick stream never ends");
            let now = start + Duration::from_millis(50 * tick);
            for event in dispatcher.poll(now) {
                match event.gesture {
                    Gesture::LongPress => long_presses += 1,
                    Gesture::Repeat => repeats += 1,
                    other => panic!("unexpected gesture {:?}", other),
                }
            }
        }

        assert_eq!(long_presses, 1, "exactly one long press per hold");
        assert!(
            repeats >= 2,
            "held backspace should repeat under tick polling, got {}",
            repeats
        );
    }
}
