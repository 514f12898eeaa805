//! Pixel Watchface - a watch face engine with an ambient-aware redraw scheduler
//!
//! This library draws a background, an optional mascot sprite and the current
//! time, keeping a wall-clock aligned redraw tick alive only while the face is
//! visible and the watch is not in ambient mode.

pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::WatchFaceEngine;
pub use error::{Result, WatchFaceError};
pub use render::{Frame, VariantKind, WatchFaceVariant};
pub use tasks::watchface_engine_task;
pub use utils::signals::shutdown_signal;
