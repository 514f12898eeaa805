//! Face variants
//!
//! Each variant is plain data: which artwork it loads, how it scales it,
//! where the label goes and how often the label needs refreshing.

use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use super::bitmap::{Color, ScalingFilter};
use super::time_label::TimePattern;
use crate::assets::{self, AssetSet};
use crate::error::Result;

/// The shipped variants of the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// Dusk background, hours and minutes
    Classic,
    /// Night sky with the mascot in the corner, pixelated scaling
    Mascot,
    /// Night sky, 1-24 hour clock with seconds
    Pixel,
}

/// Where and how the time label is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    pub x: i32,
    /// Baseline
    pub y: i32,
    pub size_px: u32,
    pub color: Color,
}

/// Everything that distinguishes one face from another
#[derive(Debug, Clone)]
pub struct WatchFaceVariant {
    pub kind: VariantKind,
    pub backdrop: Color,
    pub filter: ScalingFilter,
    pub time_pattern: TimePattern,
    pub text: TextLayout,
    pub update_period: Duration,
    pub show_mascot: bool,
}

const LABEL: TextLayout = TextLayout {
    x: 20,
    y: 80,
    size_px: 48,
    color: Color::WHITE,
};

impl WatchFaceVariant {
    pub fn new(kind: VariantKind) -> Result<Self> {
        let variant = match kind {
            VariantKind::Classic => Self {
                kind,
                backdrop: Color::BLACK,
                filter: ScalingFilter::Smooth,
                time_pattern: TimePattern::parse("HH:mm")?,
                text: LABEL,
                update_period: Duration::from_millis(1000),
                show_mascot: false,
            },
            VariantKind::Mascot => Self {
                kind,
                backdrop: Color::BLACK,
                filter: ScalingFilter::Pixelated,
                time_pattern: TimePattern::parse("HH:mm:ss")?,
                text: LABEL,
                update_period: Duration::from_millis(500),
                show_mascot: true,
            },
            VariantKind::Pixel => Self {
                kind,
                backdrop: Color::BLACK,
                filter: ScalingFilter::Smooth,
                time_pattern: TimePattern::parse("kk:mm:ss")?,
                text: LABEL,
                update_period: Duration::from_millis(500),
                show_mascot: false,
            },
        };
        Ok(variant)
    }

    /// Decode the artwork this variant draws with
    pub fn load_assets(&self) -> Result<AssetSet> {
        let background = match self.kind {
            VariantKind::Classic => assets::dusk_sky(),
            VariantKind::Mascot | VariantKind::Pixel => assets::night_sky(),
        };
        let mascot = if self.show_mascot {
            Some(assets::mascot()?)
        } else {
            None
        };
        AssetSet::new(background, mascot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_only_in_data() {
        let classic = WatchFaceVariant::new(VariantKind::Classic).unwrap();
        assert_eq!(classic.time_pattern.as_str(), "HH:mm");
        assert_eq!(classic.update_period, Duration::from_secs(1));
        assert!(classic.load_assets().unwrap().mascot.is_none());

        let mascot = WatchFaceVariant::new(VariantKind::Mascot).unwrap();
        assert_eq!(mascot.filter, ScalingFilter::Pixelated);
        assert!(mascot.load_assets().unwrap().mascot.is_some());

        let pixel = WatchFaceVariant::new(VariantKind::Pixel).unwrap();
        assert_eq!(pixel.time_pattern.as_str(), "kk:mm:ss");
        assert_eq!(pixel.update_period, Duration::from_millis(500));
    }
}
