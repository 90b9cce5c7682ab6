//! BGR to HSV conversion.
//!
//! Follows the 8-bit OpenCV rules so band thresholds tuned with OpenCV
//! tooling carry over unchanged.

use super::band::Hsv;
use crate::capture::{Frame, CHANNELS};

const HSV_SHIFT: u32 = 12;
const HSV_ROUND: i32 = 1 << (HSV_SHIFT - 1);

/// `round((255 << 12) / v)`, indexed by value.
const SDIV_TABLE: [i32; 256] = div_table(255 << HSV_SHIFT, 1);
/// `round((180 << 12) / (6 * diff))`, indexed by chroma.
const HDIV_TABLE: [i32; 256] = div_table(180 << HSV_SHIFT, 6);

/// Fixed-point reciprocals `num / (scale * i)`, rounded half to even.
const fn div_table(num: i32, scale: i32) -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut i = 1;
    while i < 256 {
        let den = scale * i as i32;
        let q = num / den;
        let rem = 2 * (num % den);
        table[i] = if rem > den || (rem == den && q % 2 == 1) {
            q + 1
        } else {
            q
        };
        i += 1;
    }
    table
}

/// Converts a single BGR pixel to 8-bit HSV.
///
/// Uses the same 12-bit fixed-point arithmetic as OpenCV's `COLOR_BGR2HSV`,
/// so results match it bit for bit.
pub fn bgr_to_hsv(b: u8, g: u8, r: u8) -> Hsv {
    let v = b.max(g).max(r);
    let min = b.min(g).min(r);
    let diff = (v - min) as i32;
    let (b, g, r) = (b as i32, g as i32, r as i32);

    let s = (diff * SDIV_TABLE[v as usize] + HSV_ROUND) >> HSV_SHIFT;

    let num = if v as i32 == r {
        g - b
    } else if v as i32 == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    // Arithmetic shift floors negative hues before they wrap.
    let mut h = (num * HDIV_TABLE[diff as usize] + HSV_ROUND) >> HSV_SHIFT;
    if h < 0 {
        h += 180;
    }

    Hsv::new(h as u8, s as u8, v)
}

/// A frame converted to HSV, computed once and shared by every band.
#[derive(Debug, Clone, Default)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<Hsv>,
}

impl HsvImage {
    /// Converts a frame. Frames whose buffer does not match their
    /// dimensions convert to an empty image.
    pub fn from_frame(frame: &Frame) -> Self {
        if !frame.is_valid() || frame.is_empty() {
            return Self::default();
        }
        let pixels = frame
            .pixels()
            .chunks_exact(CHANNELS)
            .map(|px| bgr_to_hsv(px[0], px[1], px[2]))
            .collect();
        Self {
            width: frame.width(),
            height: frame.height(),
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major HSV pixels.
    #[inline]
    pub fn pixels(&self) -> &[Hsv] {
        &self.pixels
    }

    /// Returns true if the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
