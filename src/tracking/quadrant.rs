//! Quadrant geometry.
//!
//! The frame is split at `width / 2` and `height / 2`. Quadrant rectangles
//! use inclusive bounds, so pixels on a dividing line belong to two
//! rectangles; the lower-numbered quadrant wins.

use crate::extraction::Point;
use std::fmt;

/// One of the four fixed frame regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// Top left.
    First = 1,
    /// Top right.
    Second = 2,
    /// Bottom left.
    Third = 3,
    /// Bottom right.
    Fourth = 4,
}

impl Quadrant {
    /// All quadrants in tie-break order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::First,
        Quadrant::Second,
        Quadrant::Third,
        Quadrant::Fourth,
    ];

    /// Numeric id (1-4).
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a quadrant by numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.id() == id)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Quadrant boundaries for one frame size, computed once per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantLayout {
    mid_x: u32,
    mid_y: u32,
}

impl QuadrantLayout {
    /// Computes the dividers for a `width` x `height` frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            mid_x: width / 2,
            mid_y: height / 2,
        }
    }

    /// Vertical dividing line.
    #[inline]
    pub fn mid_x(&self) -> u32 {
        self.mid_x
    }

    /// Horizontal dividing line.
    #[inline]
    pub fn mid_y(&self) -> u32 {
        self.mid_y
    }

    /// Resolves the quadrant containing `point`.
    ///
    /// Equivalent to testing the rectangles in order 1 to 4 and taking the
    /// first hit; points past the frame edge fall to the nearest side.
    pub fn resolve(&self, point: Point) -> Quadrant {
        let left = point.x <= self.mid_x;
        let top = point.y <= self.mid_y;
        match (left, top) {
            (true, true) => Quadrant::First,
            (false, true) => Quadrant::Second,
            (true, false) => Quadrant::Third,
            (false, false) => Quadrant::Fourth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Inclusive rectangle of `quadrant` in a `width` x `height` frame.
    fn rect(width: u32, height: u32, quadrant: Quadrant) -> (u32, u32, u32, u32) {
        let (mid_x, mid_y) = (width / 2, height / 2);
        let (x0, x1) = match quadrant {
            Quadrant::First | Quadrant::Third => (0, mid_x),
            Quadrant::Second | Quadrant::Fourth => (mid_x, width),
        };
        let (y0, y1) = match quadrant {
            Quadrant::First | Quadrant::Second => (0, mid_y),
            Quadrant::Third | Quadrant::Fourth => (mid_y, height),
        };
        (x0, y0, x1, y1)
    }

    /// Tests the rectangles in id order and takes the first hit.
    fn first_match(width: u32, height: u32, p: Point) -> Option<Quadrant> {
        Quadrant::ALL.into_iter().find(|&q| {
            let (x0, y0, x1, y1) = rect(width, height, q);
            (x0..=x1).contains(&p.x) && (y0..=y1).contains(&p.y)
        })
    }

    #[test]
    fn test_interior_points() {
        let layout = QuadrantLayout::new(200, 100);
        assert_eq!(layout.resolve(Point::new(40, 20)), Quadrant::First);
        assert_eq!(layout.resolve(Point::new(160, 20)), Quadrant::Second);
        assert_eq!(layout.resolve(Point::new(40, 80)), Quadrant::Third);
        assert_eq!(layout.resolve(Point::new(160, 80)), Quadrant::Fourth);
    }

    #[test]
    fn test_boundary_ties_favor_lower_id() {
        let layout = QuadrantLayout::new(200, 100);
        assert_eq!(layout.resolve(Point::new(100, 50)), Quadrant::First);
        assert_eq!(layout.resolve(Point::new(100, 80)), Quadrant::Third);
        assert_eq!(layout.resolve(Point::new(160, 50)), Quadrant::Second);
        assert_eq!(layout.resolve(Point::new(101, 51)), Quadrant::Fourth);
    }

    #[test]
    fn test_ids_round_trip() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::from_id(q.id()), Some(q));
        }
        assert_eq!(Quadrant::from_id(0), None);
        assert_eq!(Quadrant::Fourth.to_string(), "4");
    }

    proptest! {
        #[test]
        fn prop_every_pixel_has_one_quadrant(
            width in 1u32..2000,
            height in 1u32..2000,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let layout = QuadrantLayout::new(width, height);
            let p = Point::new(
                ((width as f64 * fx) as u32).min(width - 1),
                ((height as f64 * fy) as u32).min(height - 1),
            );

            let resolved = layout.resolve(p);
            prop_assert!((1..=4).contains(&resolved.id()));
            prop_assert_eq!(Some(resolved), first_match(width, height, p));
        }
    }
}
