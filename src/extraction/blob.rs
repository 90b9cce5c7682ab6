//! Per-frame detection geometry.

use crate::segmentation::BallColor;

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column, from the left edge.
    pub x: u32,
    /// Row, from the top edge.
    pub y: u32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box. `width` and `height` count pixels, so a
/// single pixel has a 1x1 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// Left column.
    pub x: u32,
    /// Top row.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl BoundingBox {
    /// Builds the box spanning the inclusive corners `min` and `max`.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x + 1,
            height: max.y - min.y + 1,
        }
    }

    /// Geometric midpoint, rounded down.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// A connected, area-filtered region of one color in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Band the blob was segmented from.
    pub color: BallColor,
    /// Tight box around the region.
    pub bounding_box: BoundingBox,
    /// Center of the bounding box.
    pub centroid: Point,
    /// Foreground pixel count.
    pub area: u32,
}
