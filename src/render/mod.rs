//! Rendering module
//!
//! Everything needed to turn a surface size and the current time into draw
//! calls, and to rasterise those calls for inspection.

pub mod bitmap;
pub mod cache;
pub mod canvas;
pub mod frame;
pub mod renderer;
pub mod time_label;
pub mod variant;

// Re-export main types
pub use bitmap::{Bitmap, Color, ScalingFilter};
pub use cache::ScaledImage;
pub use canvas::{replay, RasterSurface};
pub use frame::{AssetKind, DrawCommand, Frame};
pub use renderer::FrameRenderer;
pub use time_label::TimePattern;
pub use variant::{TextLayout, VariantKind, WatchFaceVariant};
