//! Rasterising frames with embedded-graphics

use std::convert::Infallible;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};

use super::frame::{DrawCommand, Frame};

/// Draw every command of `frame` onto `target`, in order
pub fn replay<D>(frame: &Frame, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for command in &frame.commands {
        match command {
            DrawCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                Rectangle::new(Point::new(*x, *y), Size::new(*width, *height))
                    .into_styled(PrimitiveStyle::with_fill(color.to_rgb888()))
                    .draw(target)?;
            }
            DrawCommand::Blit { x, y, bitmap, .. } => {
                let origin = Point::new(*x, *y);
                target.draw_iter(
                    bitmap
                        .enumerate_pixels()
                        .filter(|(_, _, color)| color.is_opaque())
                        .map(|(px, py, color)| {
                            Pixel(origin + Point::new(px as i32, py as i32), color.to_rgb888())
                        }),
                )?;
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size_px,
                color,
                ..
            } => {
                let style = MonoTextStyle::new(font_for(*size_px), color.to_rgb888());
                Text::new(text, Point::new(*x, *y), style).draw(target)?;
            }
        }
    }
    Ok(())
}

/// Largest ProFont that fits the requested pixel size
fn font_for(size_px: u32) -> &'static MonoFont<'static> {
    match size_px {
        0..=13 => &profont::PROFONT_9_POINT,
        14..=19 => &profont::PROFONT_12_POINT,
        20..=27 => &profont::PROFONT_18_POINT,
        _ => &profont::PROFONT_24_POINT,
    }
}

/// In-memory RGB surface
#[derive(Debug, Clone)]
pub struct RasterSurface {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![Rgb888::BLACK; width as usize * height as usize],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// Binary PPM (P6) encoding
    pub fn to_ppm(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.size.width, self.size.height);
        let mut out = Vec::with_capacity(header.len() + self.pixels.len() * 3);
        out.extend_from_slice(header.as_bytes());
        for pixel in &self.pixels {
            out.extend_from_slice(&[pixel.r(), pixel.g(), pixel.b()]);
        }
        out
    }
}

impl OriginDimensions for RasterSurface {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RasterSurface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let width = self.size.width as i32;
        let height = self.size.height as i32;
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 && point.x < width && point.y < height {
                self.pixels[(point.y * width + point.x) as usize] = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::render::bitmap::{Bitmap, Color};
    use crate::render::frame::AssetKind;

    #[test]
    fn replays_fill_and_skips_transparent_pixels() {
        let sprite = Bitmap::new(2, 1, vec![Color::WHITE, Color::TRANSPARENT]).unwrap();
        let frame = Frame {
            width: 4,
            height: 4,
            commands: vec![
                DrawCommand::FillRect {
                    x: 0,
                    y: 0,
                    width: 4,
                    height: 4,
                    color: Color::rgb(10, 20, 30),
                },
                DrawCommand::Blit {
                    asset: AssetKind::Mascot,
                    x: 2,
                    y: 3,
                    width: 2,
                    height: 1,
                    bitmap: Arc::new(sprite),
                },
            ],
        };

        let mut surface = RasterSurface::new(4, 4);
        replay(&frame, &mut surface).unwrap();

        assert_eq!(surface.pixel(0, 0), Some(Rgb888::new(10, 20, 30)));
        assert_eq!(surface.pixel(2, 3), Some(Rgb888::WHITE));
        assert_eq!(surface.pixel(3, 3), Some(Rgb888::new(10, 20, 30)));
    }

    #[test]
    fn text_lands_on_the_surface() {
        let frame = Frame {
            width: 200,
            height: 100,
            commands: vec![DrawCommand::Text {
                text: "12:34".to_string(),
                x: 20,
                y: 80,
                size_px: 48,
                color: Color::WHITE,
                anti_alias: true,
            }],
        };
        let mut surface = RasterSurface::new(200, 100);
        replay(&frame, &mut surface).unwrap();

        let lit = (0..200)
            .flat_map(|x| (0..100).map(move |y| (x, y)))
            .filter(|(x, y)| surface.pixel(*x, *y) == Some(Rgb888::WHITE))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn ppm_has_header_and_three_bytes_per_pixel() {
        let ppm = RasterSurface::new(3, 2).to_ppm();
        assert!(ppm.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(ppm.len(), "P6\n3 2\n255\n".len() + 18);
    }
}
