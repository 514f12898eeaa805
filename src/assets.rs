//! Built-in pixel-art assets
//!
//! The faces ship their artwork as code: a couple of small sky backgrounds
//! generated row by row and a mascot sprite drawn in text.

use tracing::debug;

use crate::error::{Result, WatchFaceError};
use crate::render::bitmap::{Bitmap, Color};

/// Edge length of the generated backgrounds
pub const BACKGROUND_SIZE: u32 = 32;

const MASCOT_ROWS: [&str; 12] = [
    "...oooooo...",
    "..oWWWWWWo..",
    ".oWWWWWWWWo.",
    ".oWKKWWKKWo.",
    ".oWKKWWKKWo.",
    ".oWWWWWWWWo.",
    ".oWWPWWPWWo.",
    ".oWWWPPWWWo.",
    ".oWWWWWWWWo.",
    ".oWWWWWWWWo.",
    ".oWoWWoWWoo.",
    ".oo.oo.oo...",
];

const MASCOT_PALETTE: [(char, Color); 4] = [
    ('o', Color::rgb(40, 40, 64)),
    ('W', Color::rgb(240, 240, 255)),
    ('K', Color::rgb(16, 16, 24)),
    ('P', Color::rgb(255, 128, 160)),
];

const STARS: [(u32, u32); 9] = [
    (3, 2),
    (11, 5),
    (20, 1),
    (27, 7),
    (6, 11),
    (16, 9),
    (24, 13),
    (9, 17),
    (29, 18),
];

/// The decoded images a face variant draws with
#[derive(Debug, Clone)]
pub struct AssetSet {
    pub background: Bitmap,
    pub mascot: Option<Bitmap>,
}

impl AssetSet {
    pub fn new(background: Bitmap, mascot: Option<Bitmap>) -> Result<Self> {
        let set = Self { background, mascot };
        set.validate()?;
        Ok(set)
    }

    /// Every image must have a non-zero area
    pub fn validate(&self) -> Result<()> {
        if self.background.is_empty() {
            return Err(WatchFaceError::empty_asset("background"));
        }
        if self.mascot.as_ref().is_some_and(Bitmap::is_empty) {
            return Err(WatchFaceError::empty_asset("mascot"));
        }
        Ok(())
    }
}

/// Dark blue to violet sky with stars over a row of hills
pub fn night_sky() -> Bitmap {
    sky(
        Color::rgb(8, 12, 40),
        Color::rgb(72, 32, 96),
        Color::rgb(24, 56, 40),
        true,
    )
}

/// Orange dusk fading into purple, no stars
pub fn dusk_sky() -> Bitmap {
    sky(
        Color::rgb(64, 32, 96),
        Color::rgb(240, 128, 64),
        Color::rgb(48, 32, 32),
        false,
    )
}

/// The little ghost that sits in the corner
pub fn mascot() -> Result<Bitmap> {
    let sprite = Bitmap::from_ascii(&MASCOT_ROWS, &MASCOT_PALETTE)?;
    debug!("Loaded mascot sprite {:?}", sprite.dimensions());
    Ok(sprite)
}

fn sky(top: Color, horizon: Color, ground: Color, stars: bool) -> Bitmap {
    let size = BACKGROUND_SIZE;
    let ground_from = size - size / 6;
    let mut pixels = Vec::with_capacity((size * size) as usize);

    for y in 0..size {
        for x in 0..size {
            // Hills: a shallow zigzag along the ground line
            let ridge = ground_from - (x % 8).min(8 - x % 8) / 2;
            let color = if y >= ridge {
                ground
            } else if stars && STARS.contains(&(x, y)) {
                Color::WHITE
            } else {
                blend(top, horizon, y, ground_from)
            };
            pixels.push(color);
        }
    }

    Bitmap::new(size, size, pixels).unwrap_or_else(|_| Bitmap::filled(size, size, top))
}

fn blend(from: Color, to: Color, step: u32, steps: u32) -> Color {
    let t = step.min(steps) as f32 / steps.max(1) as f32;
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::rgb(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b))
}
