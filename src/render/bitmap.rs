//! RGBA bitmaps and scaling

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WatchFaceError};

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha at or above half counts as drawn; blits are not blended
    pub fn is_opaque(&self) -> bool {
        self.a >= 128
    }

    pub fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }

    fn lerp(a: Color, b: Color, t: f32) -> Color {
        let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
        Color::rgba(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
    }
}

/// How a bitmap is resampled to a new size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingFilter {
    /// Bilinear interpolation
    Smooth,
    /// Nearest neighbour, keeps hard pixel edges
    Pixelated,
}

/// Row-major RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(WatchFaceError::InvalidBitmap {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Build a bitmap from text rows, one character per pixel.
    ///
    /// Characters missing from `palette` are transparent. All rows must have
    /// the same length.
    pub fn from_ascii(rows: &[&str], palette: &[(char, Color)]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let height = rows.len() as u32;

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for (index, row) in rows.iter().enumerate() {
            let row_width = row.chars().count() as u32;
            if row_width != width {
                return Err(WatchFaceError::RaggedRows {
                    row: index,
                    expected: width,
                    actual: row_width,
                });
            }
            for ch in row.chars() {
                let color = palette
                    .iter()
                    .find(|(key, _)| *key == ch)
                    .map_or(Color::TRANSPARENT, |(_, color)| *color);
                pixels.push(color);
            }
        }

        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate `(x, y, color)` in row-major order
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Color)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, color)| (i as u32 % width, i as u32 / width, *color))
    }

    /// Resample to `width` x `height`
    pub fn scaled(&self, width: u32, height: u32, filter: ScalingFilter) -> Bitmap {
        if width == 0 || height == 0 {
            return Bitmap::filled(width, height, Color::TRANSPARENT);
        }
        if self.is_empty() {
            return Bitmap::filled(width, height, Color::TRANSPARENT);
        }
        if (width, height) == self.dimensions() {
            return self.clone();
        }

        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let color = match filter {
                    ScalingFilter::Pixelated => self.sample_nearest(x, y, width, height),
                    ScalingFilter::Smooth => self.sample_bilinear(x, y, width, height),
                };
                pixels.push(color);
            }
        }

        Bitmap {
            width,
            height,
            pixels,
        }
    }

    fn at(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    fn sample_nearest(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        let sx = (x as u64 * self.width as u64 / width as u64) as u32;
        let sy = (y as u64 * self.height as u64 / height as u64) as u32;
        self.at(sx.min(self.width - 1), sy.min(self.height - 1))
    }

    fn sample_bilinear(&self, x: u32, y: u32, width: u32, height: u32) -> Color {
        let (x0, x1, tx) = Self::axis(x, width, self.width);
        let (y0, y1, ty) = Self::axis(y, height, self.height);

        let top = Color::lerp(self.at(x0, y0), self.at(x1, y0), tx);
        let bottom = Color::lerp(self.at(x0, y1), self.at(x1, y1), tx);
        Color::lerp(top, bottom, ty)
    }

    /// Source neighbours and weight for one destination coordinate, sampling
    /// at pixel centres
    fn axis(dst: u32, dst_len: u32, src_len: u32) -> (u32, u32, f32) {
        let pos = ((dst as f32 + 0.5) * src_len as f32 / dst_len as f32 - 0.5).max(0.0);
        let lo = (pos.floor() as u32).min(src_len - 1);
        let hi = (lo + 1).min(src_len - 1);
        (lo, hi, (pos - lo as f32).clamp(0.0, 1.0))
    }
}
