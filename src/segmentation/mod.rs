//! Color-space segmentation.
//!
//! Converts frames to HSV and thresholds them against configured color
//! bands, producing one binary mask per band.

mod band;
mod hsv;
mod mask;

pub use band::{BallColor, ColorBand, Hsv};
pub use hsv::{bgr_to_hsv, HsvImage};
pub use mask::Mask;

use crate::capture::Frame;

/// Produces per-band foreground masks.
///
/// The segmenter is stateless; the HSV conversion is done once per frame
/// by [`ColorSegmenter::prepare`] and reused for every band.
#[derive(Debug, Clone)]
pub struct ColorSegmenter {
    bands: Vec<ColorBand>,
}

impl ColorSegmenter {
    /// Creates a segmenter for `bands`, processed in the given order.
    pub fn new(bands: Vec<ColorBand>) -> Self {
        Self { bands }
    }

    /// Configured bands, in processing order.
    pub fn bands(&self) -> &[ColorBand] {
        &self.bands
    }

    /// Converts a frame to HSV for subsequent [`segment`](Self::segment) calls.
    pub fn prepare(&self, frame: &Frame) -> HsvImage {
        HsvImage::from_frame(frame)
    }

    /// Thresholds an HSV image against one band.
    pub fn segment(&self, image: &HsvImage, band: &ColorBand) -> Mask {
        let bits = image.pixels().iter().map(|&px| band.contains(px)).collect();
        Mask::from_bits(image.width(), image.height(), bits).unwrap_or_default()
    }

    /// Segments a frame against every configured band.
    pub fn segment_all(&self, frame: &Frame) -> Vec<(BallColor, Mask)> {
        let image = self.prepare(frame);
        self.bands
            .iter()
            .map(|band| (band.color, self.segment(&image, band)))
            .collect()
    }
}

impl Default for ColorSegmenter {
    fn default() -> Self {
        Self::new(ColorBand::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 3] = [0, 0, 255];
    const GREEN: [u8; 3] = [0, 255, 0];

    #[test]
    fn test_segments_only_matching_pixels() {
        let mut frame = Frame::filled(10, 10, [0, 0, 0], 1);
        frame.fill_rect(1, 1, 3, 3, RED);
        frame.fill_rect(6, 6, 7, 7, GREEN);

        let masks = ColorSegmenter::default().segment_all(&frame);
        assert_eq!(masks.len(), 3);

        let (color, red) = &masks[0];
        assert_eq!(*color, BallColor::Red);
        assert_eq!(red.count(), 9);
        assert!(red.get(2, 2));
        assert!(!red.get(6, 6));

        let (_, green) = &masks[1];
        assert_eq!(green.count(), 4);

        let (_, blue) = &masks[2];
        assert_eq!(blue.count(), 0);
    }

    #[test]
    fn test_mask_matches_frame_size() {
        let frame = Frame::filled(7, 5, [0, 0, 0], 1);
        let masks = ColorSegmenter::default().segment_all(&frame);
        for (_, mask) in masks {
            assert_eq!(mask.width(), 7);
            assert_eq!(mask.height(), 5);
        }
    }

    #[test]
    fn test_zero_size_frame_gives_empty_mask() {
        let frame = Frame::new(Vec::new(), 0, 0, 1);
        let masks = ColorSegmenter::default().segment_all(&frame);
        assert!(masks.iter().all(|(_, m)| m.is_empty()));
    }
}
