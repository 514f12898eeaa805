//! Scaled image cache

use std::sync::Arc;

use tracing::debug;

use super::bitmap::{Bitmap, ScalingFilter};
use super::frame::AssetKind;

/// A source image plus its copy scaled to the last requested size.
///
/// The cached copy is only ever handed out for the size it was produced for.
#[derive(Debug)]
pub struct ScaledImage {
    kind: AssetKind,
    source: Bitmap,
    filter: ScalingFilter,
    cached: Option<Arc<Bitmap>>,
    regenerations: usize,
}

impl ScaledImage {
    pub fn new(kind: AssetKind, source: Bitmap, filter: ScalingFilter) -> Self {
        Self {
            kind,
            source,
            filter,
            cached: None,
            regenerations: 0,
        }
    }

    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn source(&self) -> &Bitmap {
        &self.source
    }

    /// Size of the cached copy, if one exists
    pub fn cached_size(&self) -> Option<(u32, u32)> {
        self.cached.as_ref().map(|bitmap| bitmap.dimensions())
    }

    /// How many times the scaled copy has been rebuilt
    pub fn regenerations(&self) -> usize {
        self.regenerations
    }

    /// Scaled copy at exactly `width` x `height`, rebuilt if the cache is stale
    pub fn scaled_to(&mut self, width: u32, height: u32) -> Arc<Bitmap> {
        if let Some(bitmap) = &self.cached {
            if bitmap.dimensions() == (width, height) {
                return Arc::clone(bitmap);
            }
        }

        debug!(
            "Rescaling {:?} from {:?} to {}x{}",
            self.kind,
            self.cached_size(),
            width,
            height
        );
        let bitmap = Arc::new(self.source.scaled(width, height, self.filter));
        self.cached = Some(Arc::clone(&bitmap));
        self.regenerations += 1;
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::bitmap::Color;

    fn image() -> ScaledImage {
        ScaledImage::new(
            AssetKind::Background,
            Bitmap::filled(8, 8, Color::WHITE),
            ScalingFilter::Smooth,
        )
    }

    #[test]
    fn same_size_reuses_cached_copy() {
        let mut image = image();
        let first = image.scaled_to(400, 400);
        let second = image.scaled_to(400, 400);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(image.regenerations(), 1);
    }

    #[test]
    fn size_change_regenerates() {
        let mut image = image();
        image.scaled_to(400, 400);
        let resized = image.scaled_to(360, 360);
        assert_eq!(resized.dimensions(), (360, 360));
        assert_eq!(image.cached_size(), Some((360, 360)));
        assert_eq!(image.regenerations(), 2);
    }
}
