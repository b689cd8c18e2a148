//! Clipping UV segments against the centered canvas square.

use kurbo::{Line, Point};

use super::EPSILON;

/// Half-extent of a canvas in centered UV space.
pub const HALF_EXTENT: f64 = 0.5;

fn inside(p: Point, radius: f64) -> bool {
    p.x >= -radius - EPSILON
        && p.x <= radius + EPSILON
        && p.y >= -radius - EPSILON
        && p.y <= radius + EPSILON
}

fn near(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= EPSILON && (a.y - b.y).abs() <= EPSILON
}

/// Clip a UV segment to the centered square `[-radius, radius]²`.
///
/// Boundary policy: points on the square edge count as inside. A segment
/// fully inside the square is returned unchanged. Crossings are computed
/// from the four edge equations of the supporting line and kept only when
/// the free coordinate stays within the square and the crossing lies within
/// the segment's own extent. One distinct surviving point yields a
/// degenerate (zero-length) segment; none yields no clip.
pub fn clip_square(seg: Line, radius: f64) -> Option<Line> {
    if inside(seg.p0, radius) && inside(seg.p1, radius) {
        return Some(seg);
    }

    let d = seg.p1 - seg.p0;
    let mut hits: Vec<(f64, Point)> = Vec::with_capacity(6);
    if inside(seg.p0, radius) {
        hits.push((0.0, seg.p0));
    }
    if inside(seg.p1, radius) {
        hits.push((1.0, seg.p1));
    }

    if d.x.abs() > EPSILON {
        for edge_x in [-radius, radius] {
            let t = (edge_x - seg.p0.x) / d.x;
            let y = seg.p0.y + t * d.y;
            if y.abs() <= radius + EPSILON && (-EPSILON..=1.0 + EPSILON).contains(&t) {
                hits.push((t, Point::new(edge_x, y)));
            }
        }
    }
    if d.y.abs() > EPSILON {
        for edge_y in [-radius, radius] {
            let t = (edge_y - seg.p0.y) / d.y;
            let x = seg.p0.x + t * d.x;
            if x.abs() <= radius + EPSILON && (-EPSILON..=1.0 + EPSILON).contains(&t) {
                hits.push((t, Point::new(x, edge_y)));
            }
        }
    }

    // Corner grazes produce the same crossing from two adjacent edges.
    let mut distinct: Vec<(f64, Point)> = Vec::with_capacity(4);
    for (t, p) in hits {
        if distinct.iter().all(|&(_, q)| !near(p, q)) {
            distinct.push((t, p));
        }
    }

    match distinct.as_slice() {
        [] => None,
        [(_, p)] => Some(Line::new(*p, *p)),
        _ => {
            let mut lo = distinct[0];
            let mut hi = distinct[0];
            for &(t, p) in &distinct[1..] {
                if t < lo.0 {
                    lo = (t, p);
                }
                if t > hi.0 {
                    hi = (t, p);
                }
            }
            Some(Line::new(lo.1, hi.1))
        }
    }
}
