//! Drawing helpers for annotated output frames.

use crate::capture::Frame;
use crate::extraction::Point;
use crate::tracking::QuadrantLayout;

/// Overlay color (BGR white).
pub const OVERLAY_COLOR: [u8; 3] = [255, 255, 255];
/// Radius of the marker drawn on each detection.
pub const MARKER_RADIUS: u32 = 10;
/// Thickness of the quadrant divider lines.
pub const LINE_THICKNESS: u32 = 2;

/// Draws a filled disc centred on `center`, clipped to the frame.
pub fn fill_circle(frame: &mut Frame, center: Point, radius: u32, bgr: [u8; 3]) {
    if frame.is_empty() {
        return;
    }
    let r = radius as i64;
    let cx = center.x as i64;
    let cy = center.y as i64;
    let max_x = frame.width() as i64 - 1;
    let max_y = frame.height() as i64 - 1;

    for y in (cy - r).max(0)..=(cy + r).min(max_y) {
        for x in (cx - r).max(0)..=(cx + r).min(max_x) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                frame.set_pixel(x as u32, y as u32, bgr);
            }
        }
    }
}

/// Draws the vertical and horizontal quadrant dividers.
pub fn draw_quadrant_lines(frame: &mut Frame, layout: &QuadrantLayout, bgr: [u8; 3]) {
    if frame.is_empty() {
        return;
    }
    let (x0, x1) = line_span(layout.mid_x());
    let (y0, y1) = line_span(layout.mid_y());
    let bottom = frame.height() - 1;
    let right = frame.width() - 1;

    frame.fill_rect(x0, 0, x1, bottom, bgr);
    frame.fill_rect(0, y0, right, y1, bgr);
}

/// Pixel span of a divider line centred on `mid`.
fn line_span(mid: u32) -> (u32, u32) {
    let half = LINE_THICKNESS / 2;
    let start = mid.saturating_sub(half);
    (start, start + LINE_THICKNESS - 1)
}
