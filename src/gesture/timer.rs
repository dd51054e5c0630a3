// SPDX-License-Identifier: GPL-3.0-only

//! Periodic ticks for gesture deadline polling.
//!
//! Long-press and repeat deadlines are held inside the dispatcher and
//! checked against the clock; the only asynchronous actor is this tick
//! stream, which re-enters the dispatch thread at a fixed cadence so the
//! host can call [`GestureDispatcher::poll`] between touch events. Dropping
//! the stream cancels the ticking; no task outlives it.
//!
//! [`GestureDispatcher::poll`]: crate::gesture::GestureDispatcher::poll

use futures::Stream;
use std::time::{Duration, Instant};

use crate::settings;

/// Returns a stream that yields the current time every `period`.
///
/// The first tick arrives one period after the stream is first polled.
pub fn ticks(period: Duration) -> impl Stream<Item = Instant> {
    futures::stream::unfold(period, |period| async move {
        tokio::time::sleep(period).await;
        Some((Instant::now(), period))
    })
}

/// Returns the standard gesture tick stream.
///
/// The cadence is well under the shortest gesture deadline, so deadline
/// firing lag stays imperceptible.
pub fn gesture_ticks() -> impl Stream<Item = Instant> {
    ticks(Duration::from_millis(settings::GESTURE_TICK_INTERVAL_MS))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    /// The stream ticks at the requested cadence.
    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_cadence() {
        let period = Duration::from_millis(50);
        let mut stream = Box::pin(ticks(period));

        let test_start = tokio::time::Instant::now();
        for expected in 1..=3u32 {
            stream.next().await.expect("tick stream never ends");
            assert_eq!(
                tokio::time::Instant::now().duration_since(test_start),
                period * expected,
                "tick {} should arrive one period after the previous",
                expected
            );
        }
    }

    /// Dropping the stream stops the ticking; nothing lingers.
    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let mut stream = Box::pin(gesture_ticks());
        stream.next().await.expect("first tick should arrive");
        drop(stream);
        // Nothing to assert beyond not hanging: the sleep lived inside the
        // stream and died with it.
    }
}
