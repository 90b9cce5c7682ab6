//! Connected-component labelling of binary masks.

use super::blob::{BoundingBox, Point};
use crate::segmentation::Mask;

/// One maximal 8-connected foreground region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// First pixel reached in raster order (top-most, then left-most).
    pub seed: Point,
    /// Foreground pixel count.
    pub area: u32,
    /// Tight box around the region.
    pub bounding_box: BoundingBox,
}

const NEIGHBORS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Finds every connected region in `mask`, in raster order of their seeds.
pub fn find_regions(mask: &Mask) -> Vec<Region> {
    let width = mask.width();
    let height = mask.height();
    let mut visited = vec![false; mask.bits().len()];
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let index = (y as usize) * (width as usize) + x as usize;
            if visited[index] || !mask.get(x, y) {
                continue;
            }
            regions.push(grow_region(mask, Point::new(x, y), &mut visited));
        }
    }

    regions
}

/// Flood-fills from `seed`, marking every reached pixel as visited.
fn grow_region(mask: &Mask, seed: Point, visited: &mut [bool]) -> Region {
    let width = mask.width() as i64;
    let height = mask.height() as i64;

    let mut stack = vec![seed];
    visited[(seed.y as usize) * (width as usize) + seed.x as usize] = true;

    let mut area = 0u32;
    let mut min = seed;
    let mut max = seed;

    while let Some(current) = stack.pop() {
        area += 1;
        min.x = min.x.min(current.x);
        min.y = min.y.min(current.y);
        max.x = max.x.max(current.x);
        max.y = max.y.max(current.y);

        for (dx, dy) in NEIGHBORS {
            let nx = current.x as i64 + dx;
            let ny = current.y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            let index = (ny * width + nx) as usize;
            if !visited[index] && mask.get(nx as u32, ny as u32) {
                visited[index] = true;
                stack.push(Point::new(nx as u32, ny as u32));
            }
        }
    }

    Region {
        seed,
        area,
        bounding_box: BoundingBox::from_corners(min, max),
    }
}
