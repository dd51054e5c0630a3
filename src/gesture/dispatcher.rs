// SPDX-License-Identifier: GPL-3.0-only

//! Per-touch gesture classification.
//!
//! Each pressed key runs a small state machine:
//!
//! ```text
//! idle -> pressed -> { released | long_pressed | repeating } -> idle
//! ```
//!
//! Touch-down starts the long-press deadline; release before it fires a
//! tap (and possibly a double tap); holding past it fires exactly one long
//! press and, for repeatable actions, repeats at a fixed interval until
//! release. Deadlines are polled from the periodic gesture tick; the
//! dispatcher itself never blocks or spawns.
//!
//! `End` fires exactly once per gesture on every path, including
//! cancellation, and removing the press entry is what stops its timers, so
//! the guarantee is mechanical: no handler failure can leave a timer
//! running.

use crate::layout::types::Action;
use crate::settings;
use std::collections::HashMap;
use std::time::{Duration, Instant};

// ============================================================================
// Geometry
// ============================================================================

/// A point in the keyboard's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A key's bounds in the keyboard's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Origin x
    pub x: f32,
    /// Origin y
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Creates a rect from origin and size.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the point lies within these bounds.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

// ============================================================================
// Gestures
// ============================================================================

/// A classified user interaction on a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Touch-down on a key.
    Press,
    /// Release before the long-press delay.
    Tap,
    /// A second tap within the double-tap window.
    DoubleTap,
    /// The long-press delay elapsed while still pressed.
    LongPress,
    /// Periodic firing while a repeatable key stays pressed.
    Repeat,
    /// The touch moved while pressed.
    Drag,
    /// Released inside the original key bounds.
    ReleaseInside,
    /// Released outside the original key bounds.
    ReleaseOutside,
    /// The gesture finished; fires exactly once on every path.
    End,
}

/// A classified gesture bound to the key's action and touch location.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    /// The classified gesture
    pub gesture: Gesture,
    /// The action of the key the gesture happened on
    pub action: Action,
    /// The touch's current location
    pub location: Point,
}

/// Timing configuration for gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTiming {
    /// Delay before a press becomes a long press.
    pub long_press_delay: Duration,
    /// Interval between repeat firings for repeatable keys.
    pub repeat_interval: Duration,
    /// Window within which a second tap is a double tap.
    pub double_tap_window: Duration,
}

impl Default for GestureTiming {
    fn default() -> Self {
        Self {
            long_press_delay: Duration::from_millis(settings::LONG_PRESS_DELAY_MS),
            repeat_interval: Duration::from_millis(settings::REPEAT_INTERVAL_MS),
            double_tap_window: Duration::from_millis(settings::DOUBLE_TAP_WINDOW_MS),
        }
    }
}

/// Tracking state for one pressed key.
#[derive(Debug, Clone)]
struct PressState {
    bounds: Rect,
    location: Point,
    long_press_at: Instant,
    long_press_fired: bool,
    next_repeat_at: Option<Instant>,
}

/// Classifies raw touch events into gestures.
///
/// One dispatcher serves the whole keyboard; presses are tracked per key.
/// All methods take the current time explicitly so deadline behavior is
/// deterministic under test.
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    timing: GestureTiming,
    presses: HashMap<Action, PressState>,
    last_taps: HashMap<Action, Instant>,
}

impl GestureDispatcher {
    /// Creates a dispatcher with the given timing.
    #[must_use]
    pub fn new(timing: GestureTiming) -> Self {
        Self {
            timing,
            presses: HashMap::new(),
            last_taps: HashMap::new(),
        }
    }

    /// Handles a touch-down on a key.
    ///
    /// Starts the long-press deadline. A stale press on the same key (one
    /// that never delivered `End`) is closed out first, cancelling its
    /// timers.
    pub fn touch_down(
        &mut self,
        action: &Action,
        bounds: Rect,
        location: Point,
        now: Instant,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();

        if let Some(stale) = self.presses.remove(action) {
            tracing::warn!("new press on {} with a stale press active", action);
            events.push(GestureEvent {
                gesture: Gesture::End,
                action: action.clone(),
                location: stale.location,
            });
        }

        self.presses.insert(
            action.clone(),
            PressState {
                bounds,
                location,
                long_press_at: now + self.timing.long_press_delay,
                long_press_fired: false,
                next_repeat_at: None,
            },
        );
        events.push(GestureEvent {
            gesture: Gesture::Press,
            action: action.clone(),
            location,
        });
        events
    }

    /// Handles a touch moving while pressed.
    ///
    /// Updates the tracked location and reports a drag. Moves for keys with
    /// no active press are stray events and are ignored.
    pub fn touch_move(&mut self, action: &Action, location: Point) -> Vec<GestureEvent> {
        match self.presses.get_mut(action) {
            Some(press) => {
                press.location = location;
                vec![GestureEvent {
                    gesture: Gesture::Drag,
                    action: action.clone(),
                    location,
                }]
            }
            None => Vec::new(),
        }
    }

    /// Handles a touch release.
    ///
    /// A release before the long-press delay is a tap (and a double tap if
    /// within the window of the previous tap on the same key). The release
    /// is classified against the original key bounds, and `End` always
    /// closes the sequence. Dropping the press entry stops its timers.
    pub fn touch_up(&mut self, action: &Action, location: Point, now: Instant) -> Vec<GestureEvent> {
        let Some(press) = self.presses.remove(action) else {
            tracing::debug!("release on {} with no active press", action);
            return Vec::new();
        };

        let mut events = Vec::new();

        if !press.long_press_fired {
            events.push(GestureEvent {
                gesture: Gesture::Tap,
                action: action.clone(),
                location,
            });
            match self.last_taps.remove(action) {
                Some(previous) if now.duration_since(previous) <= self.timing.double_tap_window => {
                    // The window resets after a double tap; a third tap
                    // starts a fresh one.
                    events.push(GestureEvent {
                        gesture: Gesture::DoubleTap,
                        action: action.clone(),
                        location,
                    });
                }
                _ => {
                    self.last_taps.insert(action.clone(), now);
                }
            }
        }

        let release = if press.bounds.contains(location) {
            Gesture::ReleaseInside
        } else {
            Gesture::ReleaseOutside
        };
        events.push(GestureEvent {
            gesture: release,
            action: action.clone(),
            location,
        });
        events.push(GestureEvent {
            gesture: Gesture::End,
            action: action.clone(),
            location,
        });
        events
    }

    /// Handles a cancelled touch (pointer lost, system interruption).
    ///
    /// No tap or release is classified, but `End` is still delivered and
    /// the press's timers stop.
    pub fn touch_cancel(&mut self, action: &Action) -> Vec<GestureEvent> {
        match self.presses.remove(action) {
            Some(press) => vec![GestureEvent {
                gesture: Gesture::End,
                action: action.clone(),
                location: press.location,
            }],
            None => Vec::new(),
        }
    }

    /// Polls long-press and repeat deadlines.
    ///
    /// Called from the periodic gesture tick. Fires at most one `LongPress`
    /// per press; repeatable actions then fire `Repeat` each time the
    /// repeat deadline passes, re-armed relative to `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        for (action, press) in &mut self.presses {
            if !press.long_press_fired && now >= press.long_press_at {
                press.long_press_fired = true;
                tracing::debug!("long press on {}", action);
                events.push(GestureEvent {
                    gesture: Gesture::LongPress,
                    action: action.clone(),
                    location: press.location,
                });
                if action.is_repeatable() {
                    press.next_repeat_at = Some(now + self.timing.repeat_interval);
                }
            } else if let Some(deadline) = press.next_repeat_at {
                if now >= deadline {
                    press.next_repeat_at = Some(now + self.timing.repeat_interval);
                    events.push(GestureEvent {
                        gesture: Gesture::Repeat,
                        action: action.clone(),
                        location: press.location,
                    });
                }
            }
        }
        events
    }

    /// Returns `true` if the key is currently pressed.
    #[must_use]
    pub fn is_pressed(&self, action: &Action) -> bool {
        self.presses.contains_key(action)
    }

    /// Returns the number of concurrently pressed keys.
    #[must_use]
    pub fn active_press_count(&self) -> usize {
        self.presses.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_bounds() -> Rect {
        Rect::new(0.0, 0.0, 40.0, 50.0)
    }

    fn inside() -> Point {
        Point::new(10.0, 10.0)
    }

    fn gestures(events: &[GestureEvent]) -> Vec<Gesture> {
        events.iter().map(|e| e.gesture).collect()
    }

    fn action() -> Action {
        Action::Character("a".to_string())
    }

    /// A release before the delay fires exactly one tap and one end.
    #[test]
    fn test_tap_sequence() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();

        let down = dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        assert_eq!(gestures(&down), vec![Gesture::Press]);

        let up = dispatcher.touch_up(&action(), inside(), start + Duration::from_millis(80));
        assert_eq!(
            gestures(&up),
            vec![Gesture::Tap, Gesture::ReleaseInside, Gesture::End],
            "short press should tap, release inside, and end"
        );
        assert!(!dispatcher.is_pressed(&action()));
    }

    /// A press held past the delay fires exactly one long press and one
    /// end, and zero taps.
    #[test]
    fn test_long_press_sequence() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let delay = dispatcher.timing.long_press_delay;

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);

        // Not due yet.
        assert!(dispatcher.poll(start + delay / 2).is_empty());

        let due = dispatcher.poll(start + delay);
        assert_eq!(gestures(&due), vec![Gesture::LongPress]);

        // Never a second long press for the same hold.
        assert!(
            dispatcher.poll(start + delay * 3).is_empty(),
            "long press must fire at most once per press"
        );

        let up = dispatcher.touch_up(&action(), inside(), start + delay * 4);
        assert_eq!(
            gestures(&up),
            vec![Gesture::ReleaseInside, Gesture::End],
            "release after a long press must not tap"
        );
    }

    /// Repeatable actions repeat at the configured interval after the long
    /// press, and stop on release.
    #[test]
    fn test_repeat_for_backspace() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let delay = dispatcher.timing.long_press_delay;
        let interval = dispatcher.timing.repeat_interval;

        dispatcher.touch_down(&Action::Backspace, key_bounds(), inside(), start);
        assert_eq!(
            gestures(&dispatcher.poll(start + delay)),
            vec![Gesture::LongPress]
        );

        // First repeat one interval later, then once per elapsed deadline.
        assert!(dispatcher.poll(start + delay + interval / 2).is_empty());
        assert_eq!(
            gestures(&dispatcher.poll(start + delay + interval)),
            vec![Gesture::Repeat]
        );
        assert_eq!(
            gestures(&dispatcher.poll(start + delay + interval * 2)),
            vec![Gesture::Repeat]
        );

        let up = dispatcher.touch_up(&Action::Backspace, inside(), start + delay + interval * 3);
        assert_eq!(gestures(&up), vec![Gesture::ReleaseInside, Gesture::End]);
        assert!(
            dispatcher.poll(start + delay + interval * 10).is_empty(),
            "release must stop the repeat timer"
        );
    }

    /// Non-repeatable actions never fire repeats, however long they are
    /// held.
    #[test]
    fn test_no_repeat_for_characters() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let delay = dispatcher.timing.long_press_delay;

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        assert_eq!(
            gestures(&dispatcher.poll(start + delay)),
            vec![Gesture::LongPress]
        );
        assert!(dispatcher.poll(start + delay * 10).is_empty());
    }

    /// A second tap inside the window also fires a double tap, and resets
    /// the window.
    #[test]
    fn test_double_tap_window() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let window = dispatcher.timing.double_tap_window;
        let step = Duration::from_millis(40);

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        dispatcher.touch_up(&action(), inside(), start + step);

        dispatcher.touch_down(&action(), key_bounds(), inside(), start + step * 2);
        let second = dispatcher.touch_up(&action(), inside(), start + step * 3);
        assert!(
            gestures(&second).contains(&Gesture::DoubleTap),
            "second tap inside the window should double-tap"
        );

        // Third tap right after: the window was reset, so no double tap.
        dispatcher.touch_down(&action(), key_bounds(), inside(), start + step * 4);
        let third = dispatcher.touch_up(&action(), inside(), start + step * 5);
        assert!(
            !gestures(&third).contains(&Gesture::DoubleTap),
            "double tap should reset the window"
        );

        // A tap far outside the window is a plain tap.
        let late_down = start + step * 5 + window * 2;
        dispatcher.touch_down(&action(), key_bounds(), inside(), late_down);
        let late = dispatcher.touch_up(&action(), inside(), late_down + step);
        assert!(!gestures(&late).contains(&Gesture::DoubleTap));
    }

    /// Dragging tracks the location; release outside the original bounds
    /// classifies as such.
    #[test]
    fn test_drag_and_release_outside() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let outside = Point::new(200.0, 200.0);

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        let drag = dispatcher.touch_move(&action(), outside);
        assert_eq!(gestures(&drag), vec![Gesture::Drag]);
        assert_eq!(drag[0].location, outside);

        let up = dispatcher.touch_up(&action(), outside, start + Duration::from_millis(50));
        assert_eq!(
            gestures(&up),
            vec![Gesture::Tap, Gesture::ReleaseOutside, Gesture::End]
        );
    }

    /// Cancellation still delivers exactly one end and stops timers.
    #[test]
    fn test_cancel_delivers_end() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let delay = dispatcher.timing.long_press_delay;

        dispatcher.touch_down(&Action::Backspace, key_bounds(), inside(), start);
        let cancelled = dispatcher.touch_cancel(&Action::Backspace);
        assert_eq!(gestures(&cancelled), vec![Gesture::End]);

        assert!(
            dispatcher.poll(start + delay * 2).is_empty(),
            "cancellation must stop the long-press timer"
        );
        assert!(dispatcher.touch_cancel(&Action::Backspace).is_empty());
    }

    /// A new press on a key with a stale press closes the old gesture
    /// first, so end still fires exactly once per gesture.
    #[test]
    fn test_new_press_closes_stale_press() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        // No release ever arrives; the key is pressed again.
        let second = dispatcher.touch_down(
            &action(),
            key_bounds(),
            inside(),
            start + Duration::from_secs(1),
        );
        assert_eq!(
            gestures(&second),
            vec![Gesture::End, Gesture::Press],
            "the stale gesture should end before the new press starts"
        );
        assert_eq!(dispatcher.active_press_count(), 1);
    }

    /// Concurrent presses on different keys are tracked independently.
    #[test]
    fn test_concurrent_presses() {
        let mut dispatcher = GestureDispatcher::default();
        let start = Instant::now();
        let delay = dispatcher.timing.long_press_delay;
        let other = Action::Space;

        dispatcher.touch_down(&action(), key_bounds(), inside(), start);
        dispatcher.touch_down(&other, key_bounds(), inside(), start + delay / 2);
        assert_eq!(dispatcher.active_press_count(), 2);

        // Only the first press is due at start + delay.
        let due = dispatcher.poll(start + delay);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].action, action());

        let up = dispatcher.touch_up(&other, inside(), start + delay);
        assert_eq!(
            gestures(&up),
            vec![Gesture::Tap, Gesture::ReleaseInside, Gesture::End]
        );
        assert!(dispatcher.is_pressed(&action()));
    }
}
