//! Tracked colors and their HSV bands.

use crate::capture::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of ball colors the tracker knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    /// Red ball.
    Red,
    /// Green ball.
    Green,
    /// Blue ball.
    Blue,
}

impl BallColor {
    /// Number of colors.
    pub const COUNT: usize = 3;

    /// Every color, in default processing order.
    pub const ALL: [BallColor; Self::COUNT] = [BallColor::Red, BallColor::Green, BallColor::Blue];

    /// Lowercase name as written to the event log.
    pub fn name(self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Green => "green",
            BallColor::Blue => "blue",
        }
    }

    /// Dense index, usable for per-color arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BallColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pixel in OpenCV's 8-bit HSV convention.
///
/// Hue is in half-degrees (0-179); saturation and value span 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Hsv {
    /// Hue, 0-179.
    pub h: u8,
    /// Saturation.
    pub s: u8,
    /// Value.
    pub v: u8,
}

impl Hsv {
    /// Creates a pixel from its channels.
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

impl From<[u8; 3]> for Hsv {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Hsv> for [u8; 3] {
    fn from(c: Hsv) -> Self {
        [c.h, c.s, c.v]
    }
}

/// An inclusive HSV range identifying one trackable color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    /// Color this band detects.
    pub color: BallColor,
    /// Inclusive lower bound per channel.
    pub lower: Hsv,
    /// Inclusive upper bound per channel.
    pub upper: Hsv,
}

impl ColorBand {
    /// Creates a band; call [`validate`](Self::validate) before use.
    pub fn new(color: BallColor, lower: Hsv, upper: Hsv) -> Self {
        Self {
            color,
            lower,
            upper,
        }
    }

    /// Default band for a color.
    pub fn default_for(color: BallColor) -> Self {
        match color {
            BallColor::Red => Self::new(color, Hsv::new(0, 120, 70), Hsv::new(10, 255, 255)),
            BallColor::Green => Self::new(color, Hsv::new(36, 25, 25), Hsv::new(70, 255, 255)),
            BallColor::Blue => Self::new(color, Hsv::new(94, 80, 2), Hsv::new(126, 255, 255)),
        }
    }

    /// Default bands for every color.
    pub fn defaults() -> Vec<Self> {
        BallColor::ALL.iter().map(|&c| Self::default_for(c)).collect()
    }

    /// Returns true if `px` lies inside the band on every channel.
    #[inline]
    pub fn contains(&self, px: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&px.h)
            && (self.lower.s..=self.upper.s).contains(&px.s)
            && (self.lower.v..=self.upper.v).contains(&px.v)
    }

    /// Checks that the range is well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let channels = [
            ('h', self.lower.h, self.upper.h),
            ('s', self.lower.s, self.upper.s),
            ('v', self.lower.v, self.upper.v),
        ];
        for (channel, lo, hi) in channels {
            if lo > hi {
                return Err(ConfigError::InvertedRange {
                    color: self.color,
                    channel,
                });
            }
        }
        if self.upper.h > 179 {
            return Err(ConfigError::HueOutOfRange {
                color: self.color,
                hue: self.upper.h,
            });
        }
        Ok(())
    }
}
