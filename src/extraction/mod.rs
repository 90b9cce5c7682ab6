//! Blob extraction from segmentation masks.
//!
//! This module turns a binary mask into a list of blobs: connected
//! foreground regions large enough to be a ball rather than sensor noise,
//! each reduced to a bounding box and a centroid.

mod blob;
mod components;

pub use blob::{Blob, BoundingBox, Point};
pub use components::{find_regions, Region};

use crate::segmentation::{BallColor, Mask};
use serde::{Deserialize, Serialize};

/// Default minimum region area, in pixels.
pub const DEFAULT_MIN_AREA: u32 = 500;

/// How several surviving blobs of one color in one frame are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobPolicy {
    /// Keep every blob in discovery order. Each one feeds the tracker, so
    /// a color split into disjoint regions can log several events per frame.
    #[default]
    All,
    /// Keep only the largest blob; the earlier one wins a tie.
    Largest,
}

/// Result of extracting one mask.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Accepted blobs.
    pub blobs: Vec<Blob>,
    /// Regions rejected as noise.
    pub discarded: usize,
}

/// Finds blobs in masks, filtering out regions below a minimum area.
#[derive(Debug, Clone)]
pub struct BlobExtractor {
    min_area: u32,
    policy: BlobPolicy,
}

impl BlobExtractor {
    /// Creates an extractor keeping regions of at least `min_area` pixels.
    pub fn new(min_area: u32, policy: BlobPolicy) -> Self {
        Self { min_area, policy }
    }

    /// Minimum accepted area in pixels.
    pub fn min_area(&self) -> u32 {
        self.min_area
    }

    /// Extracts blobs for `color` from `mask`.
    pub fn extract(&self, mask: &Mask, color: BallColor) -> Extraction {
        let mut extraction = Extraction::default();

        for region in find_regions(mask) {
            if region.area < self.min_area {
                extraction.discarded += 1;
                continue;
            }
            extraction.blobs.push(Blob {
                color,
                bounding_box: region.bounding_box,
                centroid: region.bounding_box.center(),
                area: region.area,
            });
        }

        if self.policy == BlobPolicy::Largest && extraction.blobs.len() > 1 {
            let mut best = 0;
            for (i, blob) in extraction.blobs.iter().enumerate() {
                if blob.area > extraction.blobs[best].area {
                    best = i;
                }
            }
            let keep = extraction.blobs.swap_remove(best);
            extraction.blobs = vec![keep];
        }

        tracing::trace!(
            %color,
            accepted = extraction.blobs.len(),
            discarded = extraction.discarded,
            "Extracted blobs"
        );

        extraction
    }
}

impl Default for BlobExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA, BlobPolicy::All)
    }
}
