//! State management module
//!
//! This module contains the host-reported display state and the redraw
//! timer's bookkeeping.

pub mod display_state;
pub mod timer_state;

// Re-export main types
pub use display_state::{DeviceProperties, DisplayState};
pub use timer_state::{PendingTick, TimerPhase, TimerState};
