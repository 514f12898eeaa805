//! Deterministic capability implementations
//!
//! For hosts that pump ticks themselves (a bare render loop, a test) instead
//! of relying on an async runtime.

use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use super::{Clock, RedrawRequester, TickScheduler, TickToken};

/// A tick handed out by [`ManualTickScheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub token: TickToken,
    pub delay: Duration,
}

/// Tick scheduler that only records requests; the host delivers them
#[derive(Debug, Default)]
pub struct ManualTickScheduler {
    next_id: u64,
    pending: Vec<ScheduledTick>,
    history: Vec<ScheduledTick>,
    cancelled: Vec<TickToken>,
}

impl ManualTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks scheduled and neither cancelled nor taken
    pub fn pending(&self) -> &[ScheduledTick] {
        &self.pending
    }

    /// Every tick ever scheduled, in order
    pub fn history(&self) -> &[ScheduledTick] {
        &self.history
    }

    /// Tokens passed to `cancel`, in order
    pub fn cancelled(&self) -> &[TickToken] {
        &self.cancelled
    }

    /// Most recently scheduled tick
    pub fn last_scheduled(&self) -> Option<ScheduledTick> {
        self.history.last().copied()
    }

    /// Remove and return the pending tick that is due first
    pub fn take_next(&mut self) -> Option<ScheduledTick> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, tick)| tick.delay)
            .map(|(index, _)| index)?;
        Some(self.pending.remove(index))
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickToken {
        self.next_id += 1;
        let tick = ScheduledTick {
            token: TickToken(self.next_id),
            delay,
        };
        self.pending.push(tick);
        self.history.push(tick);
        tick.token
    }

    fn cancel(&mut self, token: TickToken) {
        self.pending.retain(|tick| tick.token != token);
        self.cancelled.push(token);
    }
}

/// Redraw requester that counts requests
#[derive(Debug, Default, Clone, Copy)]
pub struct RedrawCounter {
    pub requests: usize,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the count so far and reset it
    pub fn take(&mut self) -> usize {
        std::mem::take(&mut self.requests)
    }
}

impl RedrawRequester for RedrawCounter {
    fn request_redraw(&mut self) {
        self.requests += 1;
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Clock at `millis` after the epoch, in UTC
    pub fn at_millis(millis: i64) -> Self {
        Self::new(Utc.timestamp_millis_opt(millis).single().unwrap_or_default().into())
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        let by = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_removes_only_the_named_tick() {
        let mut ticks = ManualTickScheduler::new();
        let first = ticks.schedule_after(Duration::from_millis(300));
        let second = ticks.schedule_after(Duration::from_millis(100));
        ticks.cancel(first);

        assert_eq!(ticks.pending().len(), 1);
        assert_eq!(ticks.take_next().map(|t| t.token), Some(second));
        assert_eq!(ticks.cancelled(), &[first]);
        assert!(ticks.take_next().is_none());
    }

    #[test]
    fn fixed_clock_advances_on_demand() {
        let clock = FixedClock::at_millis(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now_millis(), 1_500);
    }
}
