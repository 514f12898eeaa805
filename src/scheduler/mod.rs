//! Redraw scheduling module
//!
//! The scheduler only needs three narrow capabilities from its host: a way to
//! schedule (and cancel) a single delayed tick, a way to request a redraw, and
//! a wall clock. Everything else about the host's event queue stays outside.

pub mod clock;
pub mod manual;
pub mod render_scheduler;

use std::time::Duration;

use serde::Serialize;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use manual::{FixedClock, ManualTickScheduler, RedrawCounter};
pub use render_scheduler::{RenderScheduler, TickOutcome};

/// Identifies one scheduled tick so it can be cancelled or recognised as stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TickToken(pub u64);

/// Host capability for delivering one delayed tick back to the engine
pub trait TickScheduler {
    /// Arrange for a tick carrying the returned token to arrive after `delay`
    fn schedule_after(&mut self, delay: Duration) -> TickToken;

    /// Drop a previously scheduled tick. Unknown or delivered tokens are ignored.
    fn cancel(&mut self, token: TickToken);
}

/// Host capability for asking the draw surface to repaint.
///
/// Fire-and-forget: implementations must not block and cannot fail.
pub trait RedrawRequester {
    fn request_redraw(&mut self);
}

/// Delay from `now_millis` to the next multiple of `period`.
///
/// Always in `(0, period]`: a tick landing exactly on a boundary waits a full
/// period instead of firing again immediately.
pub fn next_tick_delay(period: Duration, now_millis: i64) -> Duration {
    let period_ms = period.as_millis().max(1) as i64;
    let delay_ms = period_ms - now_millis.rem_euclid(period_ms);
    Duration::from_millis(delay_ms as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(500);

    #[test]
    fn delay_on_boundary_is_a_full_period() {
        assert_eq!(next_tick_delay(PERIOD, 1000), Duration::from_millis(500));
        assert_eq!(next_tick_delay(PERIOD, 0), Duration::from_millis(500));
    }

    #[test]
    fn delay_aligns_to_next_boundary() {
        assert_eq!(next_tick_delay(PERIOD, 1001), Duration::from_millis(499));
        assert_eq!(next_tick_delay(PERIOD, 1499), Duration::from_millis(1));
        assert_eq!(
            next_tick_delay(Duration::from_secs(1), 1_700_000_000_250),
            Duration::from_millis(750)
        );
    }

    #[test]
    fn delay_equals_period_minus_remainder_for_any_instant() {
        for now in (0..5_000).step_by(7) {
            let delay = next_tick_delay(PERIOD, now).as_millis() as i64;
            assert_eq!(delay, 500 - now % 500);
            assert!(delay > 0 && delay <= 500);
            assert_eq!((now + delay) % 500, 0);
        }
    }

    #[test]
    fn negative_instants_still_align() {
        assert_eq!(next_tick_delay(PERIOD, -100), Duration::from_millis(100));
    }
}
