//! Tokio-backed host capabilities

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::debug;

use crate::{
    scheduler::{RedrawRequester, TickScheduler, TickToken},
    state::DeviceProperties,
};

/// Everything the host can tell the engine
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    VisibilityChanged(bool),
    AmbientModeChanged(bool),
    PropertiesChanged(DeviceProperties),
    /// Once-a-minute time tick from the host
    TimeTick,
    SurfaceChanged { width: u32, height: u32 },
    /// A tick scheduled by [`TokioTickScheduler`] came due
    Tick(TickToken),
    Shutdown,
}

/// Delivers ticks by posting [`HostEvent::Tick`] into the engine's channel
/// from a sleeping task.
///
/// Only a weak handle to the channel is kept, so the channel closes once the
/// host drops its senders.
#[derive(Debug)]
pub struct TokioTickScheduler {
    events: mpsc::WeakUnboundedSender<HostEvent>,
    next_id: u64,
    sleepers: HashMap<TickToken, JoinHandle<()>>,
}

impl TokioTickScheduler {
    pub fn new(events: mpsc::UnboundedSender<HostEvent>) -> Self {
        Self {
            events: events.downgrade(),
            next_id: 0,
            sleepers: HashMap::new(),
        }
    }

    /// Number of sleeper tasks that have not finished yet
    pub fn outstanding(&self) -> usize {
        self.sleepers.values().filter(|h| !h.is_finished()).count()
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule_after(&mut self, delay: Duration) -> TickToken {
        self.sleepers.retain(|_, handle| !handle.is_finished());

        self.next_id += 1;
        let token = TickToken(self.next_id);
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            // The host or the engine may already be gone
            if let Some(events) = events.upgrade() {
                let _ = events.send(HostEvent::Tick(token));
            }
        });
        self.sleepers.insert(token, handle);
        token
    }

    fn cancel(&mut self, token: TickToken) {
        if let Some(handle) = self.sleepers.remove(&token) {
            debug!("Cancelling tick {:?}", token);
            handle.abort();
        }
    }
}

impl Drop for TokioTickScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.sleepers.drain() {
            handle.abort();
        }
    }
}

/// Coalescing redraw request: any number of requests between two draws
/// collapse into one
#[derive(Debug, Clone, Default)]
pub struct RedrawFlag(Arc<AtomicBool>);

impl RedrawFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a redraw was requested since the last call; clears the flag
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl RedrawRequester for RedrawFlag {
    fn request_redraw(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tick_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticks = TokioTickScheduler::new(tx.clone());
        let token = ticks.schedule_after(Duration::from_millis(500));

        assert_eq!(rx.recv().await, Some(HostEvent::Tick(token)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_tick_never_arrives() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticks = TokioTickScheduler::new(tx.clone());
        let cancelled = ticks.schedule_after(Duration::from_millis(100));
        ticks.cancel(cancelled);
        let kept = ticks.schedule_after(Duration::from_millis(300));

        assert_eq!(rx.recv().await, Some(HostEvent::Tick(kept)));
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_does_not_keep_channel_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticks = TokioTickScheduler::new(tx);
        ticks.schedule_after(Duration::from_millis(100));

        // The only strong sender went with `new`
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn redraw_requests_coalesce() {
        let mut flag = RedrawFlag::new();
        assert!(!flag.take());
        flag.request_redraw();
        flag.request_redraw();
        assert!(flag.is_set());
        assert!(flag.take());
        assert!(!flag.take());
    }
}
