//! Frame renderer

use chrono::Timelike;

use super::cache::ScaledImage;
use super::frame::{AssetKind, DrawCommand, Frame};
use super::variant::WatchFaceVariant;
use crate::assets::AssetSet;

/// Turns a surface size and an instant into the draw calls for one frame
#[derive(Debug)]
pub struct FrameRenderer {
    variant: WatchFaceVariant,
    background: ScaledImage,
    mascot: Option<ScaledImage>,
}

impl FrameRenderer {
    pub fn new(variant: WatchFaceVariant, assets: AssetSet) -> Self {
        let background = ScaledImage::new(AssetKind::Background, assets.background, variant.filter);
        let mascot = assets
            .mascot
            .map(|sprite| ScaledImage::new(AssetKind::Mascot, sprite, variant.filter));
        Self {
            variant,
            background,
            mascot,
        }
    }

    pub fn variant(&self) -> &WatchFaceVariant {
        &self.variant
    }

    pub fn background(&self) -> &ScaledImage {
        &self.background
    }

    pub fn mascot(&self) -> Option<&ScaledImage> {
        self.mascot.as_ref()
    }

    pub fn time_label<T: Timelike>(&self, now: &T) -> String {
        self.variant.time_pattern.format(now)
    }

    /// Draw calls for a `width` x `height` surface at `now`.
    ///
    /// Backdrop fill, background blit, optional mascot blit in the
    /// bottom-right quarter-width square, then the time label.
    pub fn render<T: Timelike>(&mut self, width: u32, height: u32, now: &T, anti_alias: bool) -> Frame {
        if width == 0 || height == 0 {
            return Frame::empty(width, height);
        }

        let mut commands = Vec::with_capacity(4);
        commands.push(DrawCommand::FillRect {
            x: 0,
            y: 0,
            width,
            height,
            color: self.variant.backdrop,
        });

        let background = self.background.scaled_to(width, height);
        commands.push(DrawCommand::Blit {
            asset: AssetKind::Background,
            x: 0,
            y: 0,
            width,
            height,
            bitmap: background,
        });

        if let Some(mascot) = self.mascot.as_mut() {
            let size = width / 4;
            if size > 0 {
                let bitmap = mascot.scaled_to(size, size);
                commands.push(DrawCommand::Blit {
                    asset: AssetKind::Mascot,
                    x: (width - size) as i32,
                    y: height as i32 - size as i32,
                    width: size,
                    height: size,
                    bitmap,
                });
            }
        }

        let text = self.variant.text;
        commands.push(DrawCommand::Text {
            text: self.time_label(now),
            x: text.x,
            y: text.y,
            size_px: text.size_px,
            color: text.color,
            anti_alias,
        });

        Frame {
            width,
            height,
            commands,
        }
    }
}
