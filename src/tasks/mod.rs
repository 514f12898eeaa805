//! Host runtime module
//!
//! Tokio implementations of the engine's host capabilities and the task that
//! feeds host events to the engine.

pub mod engine_loop;
pub mod tick_driver;

// Re-export main types
pub use engine_loop::{watchface_engine_task, FrameSink};
pub use tick_driver::{HostEvent, RedrawFlag, TokioTickScheduler};
