//! Pixel drawing primitives used by the paint tools.
//!
//! All writes go through bounds-checked [`PixelImage::set`], so callers may
//! pass coordinates that run off the canvas; the off-canvas portion is
//! dropped.

use kurbo::Point;

use super::{DirtyRect, PixelImage, CLEAR};

/// Stamp a filled disc. Radius 0 is a single pixel.
pub fn stamp_disc(img: &mut PixelImage, cx: i32, cy: i32, radius: i32, color: u8) {
    debug_assert_ne!(color, CLEAR, "the sentinel is not a drawable color");
    if radius <= 0 {
        img.set(cx, cy, color);
        return;
    }
    let r_sq = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r_sq {
                img.set(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Draw a straight stroke between two pixel-space points with the given
/// brush thickness, stamping the brush disc along the segment.
pub fn draw_line(img: &mut PixelImage, from: Point, to: Point, thickness: u32, color: u8) {
    let radius = (thickness.max(1) as i32 - 1) / 2;
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let steps = ((dx.abs().max(dy.abs()).ceil() as i32).max(1)) * 2;
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let x = (from.x + dx * t).floor() as i32;
        let y = (from.y + dy * t).floor() as i32;
        stamp_disc(img, x, y, radius, color);
    }
}

/// Draw the four edges of the rectangle spanned by two corner points.
pub fn outline_rect(img: &mut PixelImage, a: Point, b: Point, thickness: u32, color: u8) {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
    draw_line(img, Point::new(x0, y0), Point::new(x1, y0), thickness, color);
    draw_line(img, Point::new(x1, y0), Point::new(x1, y1), thickness, color);
    draw_line(img, Point::new(x1, y1), Point::new(x0, y1), thickness, color);
    draw_line(img, Point::new(x0, y1), Point::new(x0, y0), thickness, color);
}

/// Flood-fill the contiguous region of `source` pixels matching the color
/// under `(x, y)`, writing the replacement into `target`.
///
/// Reads come from `source` (the committed picture), writes go to `target`
/// (the author's overlay), so the fill never feeds on its own output.
/// Returns the filled region, `None` when the seed is out of bounds or the
/// region already has the requested color.
///
/// Panics on mismatched buffer dimensions.
pub fn flood_fill(
    source: &PixelImage,
    target: &mut PixelImage,
    x: i32,
    y: i32,
    color: u8,
) -> Option<DirtyRect> {
    assert_eq!(
        (source.width(), source.height()),
        (target.width(), target.height()),
        "pixel buffer dimensions differ"
    );
    debug_assert_ne!(color, CLEAR, "the sentinel is not a drawable color");
    let start = source.get(x, y)?;
    if start == color {
        return None;
    }

    let mut region = DirtyRect::point(x, y);
    let mut pending = vec![(x, y)];
    target.set(x, y, color);
    while let Some((px, py)) = pending.pop() {
        region.include(px, py);
        for (nx, ny) in [(px - 1, py), (px + 1, py), (px, py - 1), (px, py + 1)] {
            if source.get(nx, ny) == Some(start) && target.get(nx, ny) != Some(color) {
                target.set(nx, ny, color);
                pending.push((nx, ny));
            }
        }
    }
    Some(region)
}
