//! Draw primitives produced for one redraw

use std::sync::Arc;

use serde::Serialize;

use super::bitmap::{Bitmap, Color};

/// Which asset a blit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Background,
    Mascot,
}

/// One atomic drawing operation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    },
    Blit {
        asset: AssetKind,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        #[serde(skip)]
        bitmap: Arc<Bitmap>,
    },
    /// `y` is the text baseline
    Text {
        text: String,
        x: i32,
        y: i32,
        size_px: u32,
        color: Color,
        anti_alias: bool,
    },
}

/// Everything drawn for one redraw of a `width` x `height` surface
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Blits in draw order
    pub fn blits(&self) -> impl Iterator<Item = (AssetKind, &Arc<Bitmap>)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Blit { asset, bitmap, .. } => Some((*asset, bitmap)),
            _ => None,
        })
    }

    /// Text of the first text command, if any
    pub fn label(&self) -> Option<&str> {
        self.commands.iter().find_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
