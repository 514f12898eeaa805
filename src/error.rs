//! Error types for the watch face engine.
//!
//! Scheduling and drawing have no failure paths of their own; the only
//! errors come from building the static pieces of a face (bitmaps and time
//! patterns) at startup, and those are fatal for the face being created.

use thiserror::Error;

/// The main error type for watch face construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchFaceError {
    /// A time pattern contained a letter that has no meaning
    #[error("Invalid time pattern {pattern:?}: {reason}")]
    InvalidTimePattern { pattern: String, reason: String },

    /// Pixel buffer length does not match the declared dimensions
    #[error("Invalid bitmap: {width}x{height} needs {expected} pixels, got {actual}")]
    InvalidBitmap {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A text sprite row is not as wide as the first row
    #[error("Ragged bitmap: row {row} has {actual} pixels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: u32,
        actual: u32,
    },

    /// An asset decoded to a zero-area image
    #[error("Asset {name:?} is empty")]
    EmptyAsset { name: String },
}

/// Standard Result type for watch face operations.
pub type Result<T> = std::result::Result<T, WatchFaceError>;

impl WatchFaceError {
    /// Create an InvalidTimePattern error
    pub fn time_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTimePattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Create an EmptyAsset error
    pub fn empty_asset(name: impl Into<String>) -> Self {
        Self::EmptyAsset { name: name.into() }
    }
}
