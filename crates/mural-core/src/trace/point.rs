//! Single-ray canvas picking.

use glam::DVec3;
use kurbo::Point;

use super::{MAX_REACH, REACH_MARGIN};
use crate::frame::{CanvasFrame, FrameId};
use crate::geom::Line3;

/// A successful canvas pick.
#[derive(Debug, Clone, Copy)]
pub struct PointHit {
    pub frame: FrameId,
    /// Pixel-space coordinates on the canvas; may lie outside the canvas
    /// bounds when near-misses were requested.
    pub pixel: Point,
    /// World-space intersection point on the canvas plane.
    pub world: DVec3,
    /// Squared distance from the eye to the intersection.
    pub distance_sq: f64,
}

/// Tuning for a single pick.
#[derive(Debug, Clone, Copy)]
pub struct PickOptions {
    /// Maximum pick distance in world units.
    pub max_distance: f64,
    /// Distance to the first opaque obstruction along the ray, if the host
    /// reported one; farther canvases are hidden behind it.
    pub obstruction: Option<f64>,
    /// Keep hits whose pixel falls outside the canvas bounds.
    pub allow_near_miss: bool,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: MAX_REACH + REACH_MARGIN,
            obstruction: None,
            allow_near_miss: false,
        }
    }
}

/// Cast the eye line against every candidate frame and return the nearest
/// hit by squared distance; ties go to the first candidate encountered.
pub fn pick_canvas(
    eye: &Line3,
    candidates: &[CanvasFrame],
    options: &PickOptions,
) -> Option<PointHit> {
    let max_sq = options.max_distance * options.max_distance;
    let obstruction_sq = options.obstruction.map(|d| d * d);

    let mut best: Option<PointHit> = None;
    for frame in candidates {
        let Some(world) = frame.pose.plane().intersect_line(eye) else {
            continue;
        };
        // Plane hits behind the eye never win a pick.
        if (world - eye.origin).dot(eye.direction) < 0.0 {
            continue;
        }
        let pixel = frame.uv_to_pixel(frame.content_uv(world));
        if !options.allow_near_miss && !frame.contains_pixel(pixel) {
            continue;
        }
        let distance_sq = (world - eye.origin).length_squared();
        if distance_sq > max_sq {
            continue;
        }
        if let Some(limit) = obstruction_sq {
            if distance_sq > limit {
                continue;
            }
        }
        if best.map_or(true, |b| distance_sq < b.distance_sq) {
            best = Some(PointHit {
                frame: frame.id,
                pixel,
                world,
                distance_sq,
            });
        }
    }
    best
}
