//! Wall clock capability

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current local wall-clock time
pub trait Clock {
    /// Current instant in the watch's local offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Clock backed by the operating system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}
