//! Stream and detection configuration.
//!
//! Defaults are one HSV band per ball color and a 500 pixel noise cutoff.

use crate::extraction::BlobPolicy;
use crate::segmentation::{BallColor, ColorBand};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Geometry and timing of a raw input stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Declared frames per second.
    ///
    /// Used as given, fractional part included: at 29.97 fps, frame 30 is
    /// logged at 1.00 s. Tools that truncate the rate to 29 would log 1.03 s.
    pub fps: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fps: 30.0,
        }
    }
}

impl StreamConfig {
    /// Creates a new configuration with the specified geometry.
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self { width, height, fps }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(ConfigError::InvalidFrameRate);
        }
        Ok(())
    }
}

/// Parameters of the per-frame detection stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Color bands to segment, processed in this order every frame.
    pub bands: Vec<ColorBand>,
    /// Regions smaller than this many pixels are discarded as noise.
    pub min_area: u32,
    /// How multiple surviving blobs of one color are handled.
    pub blob_policy: BlobPolicy,
    /// Draw detection markers and quadrant lines onto output frames.
    pub annotate: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            bands: ColorBand::defaults(),
            min_area: 500,
            blob_policy: BlobPolicy::All,
            annotate: true,
        }
    }
}

impl DetectionConfig {
    /// Validates the band set and thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bands.is_empty() {
            return Err(ConfigError::NoBands);
        }
        let mut seen: HashSet<BallColor> = HashSet::new();
        for band in &self.bands {
            band.validate()?;
            if !seen.insert(band.color) {
                return Err(ConfigError::DuplicateBand(band.color));
            }
        }
        if self.min_area == 0 {
            return Err(ConfigError::InvalidMinArea);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    /// Frame rate is zero, negative or not finite.
    #[error("invalid frame rate (must be a positive number)")]
    InvalidFrameRate,
    /// The band list is empty.
    #[error("at least one color band is required")]
    NoBands,
    /// Two bands share a color.
    #[error("color band {0} is configured more than once")]
    DuplicateBand(BallColor),
    /// A lower bound exceeds its upper bound.
    #[error("color band {color} has lower bound above upper bound on channel {channel}")]
    InvertedRange {
        /// Offending band.
        color: BallColor,
        /// Channel name: `h`, `s` or `v`.
        channel: char,
    },
    /// Upper hue is past the 8-bit hue range.
    #[error("color band {color} hue {hue} exceeds 179")]
    HueOutOfRange {
        /// Offending band.
        color: BallColor,
        /// Configured upper hue.
        hue: u8,
    },
    /// Minimum area is zero.
    #[error("minimum blob area must be at least 1 pixel")]
    InvalidMinArea,
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Raw input geometry and timing.
    #[serde(default)]
    pub stream: StreamConfig,
    /// Segmentation, filtering and annotation settings.
    #[serde(default)]
    pub detection: DetectionConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stream.validate()?;
        self.detection.validate()
    }
}
