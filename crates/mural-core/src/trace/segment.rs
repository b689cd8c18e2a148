//! Cross-canvas stroke tracing.
//!
//! A continuous drag between two samples must produce visually continuous
//! ink even when the two picks land on different canvases. The sweep the
//! viewer's look-line traced between the samples is reconstructed as a
//! plane and cut against every nearby frame, yielding one span per canvas.
//! The result is piecewise linear; curvature is not reconstructed.

use glam::DVec3;
use kurbo::{Line, Point};

use crate::frame::{CanvasFrame, FrameId};
use crate::geom::{clip_square, Line3, Plane, HALF_EXTENT};

/// One endpoint sample of an in-progress stroke.
#[derive(Debug, Clone, Copy)]
pub struct StrokeSample {
    /// Frame the pick landed on (possibly as a near-miss).
    pub frame: FrameId,
    /// World-space point on the picked canvas plane.
    pub world: DVec3,
    /// Eye position at the time of the sample.
    pub eye: DVec3,
}

/// A stroke portion to draw on one canvas, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpan {
    pub frame: FrameId,
    pub from: Point,
    pub to: Point,
}

fn span(frame: &CanvasFrame, uv: Line) -> SegmentSpan {
    SegmentSpan {
        frame: frame.id,
        from: frame.uv_to_pixel(uv.p0),
        to: frame.uv_to_pixel(uv.p1),
    }
}

fn within(uv: Point, margin: f64) -> bool {
    uv.x.abs() <= HALF_EXTENT + margin && uv.y.abs() <= HALF_EXTENT + margin
}

/// Direct same-frame span. With `require_margin`, at least one endpoint
/// must lie within the canvas bounds expanded by a brush-proportional
/// margin.
fn direct_span(
    prev: &StrokeSample,
    current: &StrokeSample,
    candidates: &[CanvasFrame],
    brush_px: u32,
    require_margin: bool,
) -> Option<SegmentSpan> {
    if prev.frame != current.frame {
        return None;
    }
    let frame = candidates.iter().find(|f| f.id == prev.frame)?;
    let a = frame.content_uv(prev.world);
    let b = frame.content_uv(current.world);
    if require_margin {
        let margin = f64::from(brush_px) / f64::from(frame.resolution);
        if !within(a, margin) && !within(b, margin) {
            return None;
        }
    }
    Some(span(frame, Line::new(a, b)))
}

/// Trace the drag from `prev` to `current` across every candidate frame,
/// emitting one pixel-space span per canvas the sweep touches. Drawing the
/// spans independently reconstructs the full visual stroke.
pub fn trace_segment(
    prev: &StrokeSample,
    current: &StrokeSample,
    candidates: &[CanvasFrame],
    brush_px: u32,
) -> Vec<SegmentSpan> {
    // No boundary was crossed: draw directly between the two UVs.
    if let Some(direct) = direct_span(prev, current, candidates, brush_px, true) {
        return vec![direct];
    }

    // The sweep plane contains the current eye and both sample points.
    let Some(sweep) = Plane::from_points(current.eye, prev.world, current.world) else {
        // Eye collinear with the motion: no reliable sweep plane.
        return direct_span(prev, current, candidates, brush_px, false)
            .map(|s| vec![s])
            .unwrap_or_default();
    };

    let motion = Line3::between(prev.world, current.world);
    let mut spans = Vec::new();
    for frame in candidates {
        // Far-side culling: keep the frame when either sampled eye position
        // sees its front face.
        let origin = frame.pose.origin();
        if !frame.pose.is_front_side(origin - prev.eye)
            && !frame.pose.is_front_side(origin - current.eye)
        {
            continue;
        }
        let Some(cut) = sweep.intersect_plane(&frame.pose.plane()) else {
            continue;
        };
        // The portion of the sweep relevant to this frame.
        let projected = cut.closest_segment(&motion);
        let a = frame.content_uv(projected.origin);
        let b = frame.content_uv(projected.target());
        let Some(clipped) = clip_square(Line::new(a, b), HALF_EXTENT) else {
            continue;
        };
        spans.push(span(frame, clipped));
    }
    spans
}
