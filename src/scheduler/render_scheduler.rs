//! Redraw tick scheduler

use std::time::Duration;

use tracing::debug;

use super::{next_tick_delay, RedrawRequester, TickScheduler, TickToken};
use crate::state::{DisplayState, PendingTick, TimerPhase, TimerState};

/// What happened when a tick was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A redraw was requested and the next tick scheduled
    Redrawn { next_in: Duration },
    /// The tick was stale or the timer is stopped
    Ignored,
}

/// Keeps a single redraw tick going while the face is visible and
/// interactive, aligned to wall-clock multiples of `period`.
#[derive(Debug)]
pub struct RenderScheduler<S, R> {
    period: Duration,
    timer: TimerState,
    ticks: S,
    redraw: R,
}

impl<S, R> RenderScheduler<S, R>
where
    S: TickScheduler,
    R: RedrawRequester,
{
    pub fn new(period: Duration, ticks: S, redraw: R) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            timer: TimerState::new(),
            ticks,
            redraw,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn ticks(&self) -> &S {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut S {
        &mut self.ticks
    }

    pub fn redraw(&self) -> &R {
        &self.redraw
    }

    pub fn redraw_mut(&mut self) -> &mut R {
        &mut self.redraw
    }

    /// Ask for a one-off repaint without touching the timer
    pub fn request_redraw(&mut self) {
        self.redraw.request_redraw();
    }

    /// Re-evaluate after a visibility or ambient transition.
    ///
    /// The pending tick is always cancelled first, so at most one is ever
    /// outstanding.
    pub fn update(&mut self, state: DisplayState, now_millis: i64) {
        self.cancel_pending();

        if state.timer_should_run() {
            if !self.timer.is_running() {
                debug!("Redraw timer starting ({:?} period)", self.period);
            }
            self.timer.phase = TimerPhase::Running;
            self.redraw.request_redraw();
            self.schedule_next(now_millis);
        } else {
            if self.timer.is_running() {
                debug!(
                    "Redraw timer stopping: visible={}, ambient={}",
                    state.visible, state.ambient
                );
            }
            self.timer.phase = TimerPhase::Stopped;
        }
    }

    /// Handle a delivered tick
    pub fn on_tick(&mut self, token: TickToken, now_millis: i64) -> TickOutcome {
        match self.timer.pending {
            Some(pending) if pending.token == token => self.timer.pending = None,
            _ => {
                debug!("Ignoring stale tick {:?}", token);
                return TickOutcome::Ignored;
            }
        }

        if !self.timer.is_running() {
            return TickOutcome::Ignored;
        }

        self.redraw.request_redraw();
        let next_in = self.schedule_next(now_millis);
        TickOutcome::Redrawn { next_in }
    }

    /// Stop unconditionally, dropping any pending tick
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.timer.phase = TimerPhase::Stopped;
    }

    fn schedule_next(&mut self, now_millis: i64) -> Duration {
        let delay = next_tick_delay(self.period, now_millis);
        let token = self.ticks.schedule_after(delay);
        self.timer.pending = Some(PendingTick {
            token,
            due_at_millis: now_millis + delay.as_millis() as i64,
        });
        delay
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.timer.pending.take() {
            self.ticks.cancel(pending.token);
        }
    }
}
