//! Axis-aligned rectangle tracing.
//!
//! The same boundary-crossing approach as stroke segments, specialized for
//! rectangles spanned by two corner picks. Corner points map orthogonally
//! onto each candidate plane; a frame only participates when it faces the
//! single flat axis of the swept box, which rejects diagonal mounts that
//! would produce degenerate results.

use glam::DVec3;
use kurbo::Point;

use super::StrokeSample;
use crate::frame::{CanvasFrame, FrameId};

/// Extent below which a box axis counts as flat.
const FLAT_MARGIN: f64 = 1e-3;

/// Dot-product threshold for a frame facing a world axis.
const AXIS_ALIGNED: f64 = 0.99;

/// A rectangle portion to draw on one canvas: opposite corners in pixel
/// space, possibly running past the canvas edges. The raster drops
/// off-canvas writes, so no false border edges appear at canvas seams.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectSpan {
    pub frame: FrameId,
    pub min: Point,
    pub max: Point,
}

fn facing_axis(forward: DVec3) -> Option<usize> {
    [DVec3::X, DVec3::Y, DVec3::Z]
        .iter()
        .position(|axis| forward.dot(*axis).abs() > AXIS_ALIGNED)
}

/// Trace the rectangle spanned by two corner picks across every candidate
/// frame, emitting one pixel-space rect per participating canvas.
pub fn trace_rect(
    start: &StrokeSample,
    current: &StrokeSample,
    candidates: &[CanvasFrame],
) -> Vec<RectSpan> {
    let lo = start.world.min(current.world);
    let hi = start.world.max(current.world);
    let extent = (hi - lo).to_array();
    let flat_axes = extent.iter().filter(|&&e| e <= FLAT_MARGIN).count();

    let mut spans = Vec::new();
    for frame in candidates {
        // The box must be flat on exactly the axis this frame faces.
        let Some(axis) = facing_axis(frame.pose.forward()) else {
            continue;
        };
        if flat_axes != 1 || extent[axis] > FLAT_MARGIN {
            continue;
        }

        // Far-side culling, as for stroke segments.
        let origin = frame.pose.origin();
        if !frame.pose.is_front_side(origin - start.eye)
            && !frame.pose.is_front_side(origin - current.eye)
        {
            continue;
        }

        let a = frame.uv_to_pixel(frame.content_uv(start.world));
        let b = frame.uv_to_pixel(frame.content_uv(current.world));
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));

        // Skip frames the rectangle does not overlap at all.
        let n = f64::from(frame.resolution);
        if max.x < 0.0 || max.y < 0.0 || min.x > n || min.y > n {
            continue;
        }
        spans.push(RectSpan {
            frame: frame.id,
            min,
            max,
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FramePose, FrameRotation};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
    use uuid::Uuid;

    fn wall_frame(x: f64) -> CanvasFrame {
        let pose = FramePose::new(DVec3::new(x, 0.0, 0.0), 0.0, 0.0, 0.5);
        CanvasFrame::new(Uuid::new_v4(), pose, FrameRotation::None, 128)
    }

    fn corner(frame: &CanvasFrame, px: Point) -> StrokeSample {
        let world = frame.pixel_to_world(px);
        StrokeSample {
            frame: frame.id,
            world,
            eye: DVec3::new(world.x, world.y, 2.0),
        }
    }

    #[test]
    fn test_rect_on_single_canvas() {
        let frame = wall_frame(0.0);
        let start = corner(&frame, Point::new(20.0, 30.0));
        let current = corner(&frame, Point::new(90.0, 100.0));
        let spans = trace_rect(&start, &current, &[frame]);
        assert_eq!(spans.len(), 1);
        let s = &spans[0];
        assert!((s.min.x - 20.0).abs() < 1e-6 && (s.min.y - 30.0).abs() < 1e-6);
        assert!((s.max.x - 90.0).abs() < 1e-6 && (s.max.y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_rect_spans_adjacent_canvases() {
        let a = wall_frame(0.0);
        let b = wall_frame(1.0);
        let c = wall_frame(2.0);
        let start = corner(&a, Point::new(50.0, 30.0));
        let current = corner(&b, Point::new(40.0, 100.0));

        let spans = trace_rect(&start, &current, &[a, b, c]);
        assert_eq!(spans.len(), 2);

        let on_a = spans.iter().find(|s| s.frame == a.id).unwrap();
        let on_b = spans.iter().find(|s| s.frame == b.id).unwrap();
        // The same world rect seen in each canvas's pixel space, one canvas
        // (128 px) apart.
        assert!((on_a.min.x - 50.0).abs() < 1e-6);
        assert!((on_a.max.x - 168.0).abs() < 1e-6);
        assert!((on_b.min.x + 78.0).abs() < 1e-6);
        assert!((on_b.max.x - 40.0).abs() < 1e-6);
        assert!((on_a.min.y - on_b.min.y).abs() < 1e-9);
    }

    #[test]
    fn test_rect_rejects_misaligned_facing_axis() {
        let wall = wall_frame(0.0);
        // A floor-mounted frame under the same volume faces Y, but the
        // swept box is flat on Z.
        let floor_pose = FramePose::new(DVec3::new(0.0, -1.0, 0.0), 0.0, FRAC_PI_2, 0.5);
        let floor = CanvasFrame::new(Uuid::new_v4(), floor_pose, FrameRotation::None, 128);

        let start = corner(&wall, Point::new(20.0, 30.0));
        let current = corner(&wall, Point::new(90.0, 100.0));
        let spans = trace_rect(&start, &current, &[wall, floor]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].frame, wall.id);
    }

    #[test]
    fn test_rect_rejects_diagonal_mount() {
        let diagonal_pose = FramePose::new(DVec3::ZERO, FRAC_PI_4, 0.0, 0.5);
        let diagonal = CanvasFrame::new(Uuid::new_v4(), diagonal_pose, FrameRotation::None, 128);
        let wall = wall_frame(0.0);
        let start = corner(&wall, Point::new(20.0, 30.0));
        let current = corner(&wall, Point::new(90.0, 100.0));
        let spans = trace_rect(&start, &current, &[diagonal]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_rect_rejects_degenerate_box() {
        // A straight vertical drag is flat on two axes: no unambiguous
        // facing axis, so nothing is emitted.
        let frame = wall_frame(0.0);
        let start = corner(&frame, Point::new(20.0, 30.0));
        let current = corner(&frame, Point::new(20.0, 100.0));
        assert!(trace_rect(&start, &current, &[frame]).is_empty());
    }

    #[test]
    fn test_rect_back_face_culled() {
        let frame = wall_frame(0.0);
        let mut start = corner(&frame, Point::new(20.0, 30.0));
        let mut current = corner(&frame, Point::new(90.0, 100.0));
        start.eye.z = -2.0;
        current.eye.z = -2.0;
        assert!(trace_rect(&start, &current, &[frame]).is_empty());
    }
}
