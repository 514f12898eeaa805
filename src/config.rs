//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::render::VariantKind;

/// CLI argument parsing structure for the host simulator
#[derive(Parser, Debug)]
#[command(name = "pixel-watchface")]
#[command(about = "Runs a pixel-art watch face against a simulated watch host")]
#[command(version)]
pub struct Config {
    /// Face variant to run
    #[arg(long, value_enum, default_value = "pixel")]
    pub variant: VariantKind,

    /// Surface width in pixels
    #[arg(long, default_value = "320")]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value = "320")]
    pub height: u32,

    /// Stop the simulation after this many seconds (0 = until interrupted)
    #[arg(long, default_value = "5")]
    pub run_for: u64,

    /// Enter ambient mode after this many seconds
    #[arg(long)]
    pub ambient_after: Option<u64>,

    /// Hide the face after this many seconds
    #[arg(long)]
    pub hide_after: Option<u64>,

    /// Report a low-bit ambient display
    #[arg(long)]
    pub low_bit_ambient: bool,

    /// Print every frame as a JSON line on stdout
    #[arg(long)]
    pub dump_frames: bool,

    /// Write the last frame as a PPM image
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// How long to run, if bounded
    pub fn run_duration(&self) -> Option<Duration> {
        (self.run_for > 0).then(|| Duration::from_secs(self.run_for))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_the_pixel_face_briefly() {
        let config = Config::try_parse_from(["pixel-watchface"]).unwrap();
        assert_eq!(config.variant, VariantKind::Pixel);
        assert_eq!((config.width, config.height), (320, 320));
        assert_eq!(config.run_duration(), Some(Duration::from_secs(5)));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags_are_parsed() {
        let config = Config::try_parse_from([
            "pixel-watchface",
            "--variant",
            "mascot",
            "--run-for",
            "0",
            "--ambient-after",
            "2",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.variant, VariantKind::Mascot);
        assert_eq!(config.run_duration(), None);
        assert_eq!(config.ambient_after, Some(2));
        assert_eq!(config.log_level(), "debug");
    }
}
