//! Frame poses: where a canvas stands in the world and how UV maps onto it.

use glam::{DQuat, DVec3};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;
use uuid::Uuid;

use crate::geom::Plane;

/// Identity of one mounted frame (and the canvas it hosts).
pub type FrameId = Uuid;

/// Surface offset when the mounting fixture is visible, as a fraction of a
/// block.
pub const SURFACE_OFFSET_VISIBLE: f64 = 1.0 / 16.0;

/// Surface offset when the mounting fixture is invisible; the bare surface
/// sits closer to the supporting block.
pub const SURFACE_OFFSET_INVISIBLE: f64 = 1.0 / 32.0;

/// Immutable pose snapshot of one canvas quad.
///
/// Derived data (rotation, basis, plane) is computed once at construction.
/// Poses are built fresh for every trace query: the host can move or rotate
/// frames between ticks, so they are never cached.
///
/// Angles are radians. The orientation is `rotate_x(pitch) *
/// rotate_y(-yaw)` applied to the canonical axes: yaw first, then pitch,
/// composed right to left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePose {
    center: DVec3,
    yaw: f64,
    pitch: f64,
    surface_offset: f64,
    rotation: DQuat,
    forward: DVec3,
    up: DVec3,
    right: DVec3,
    origin: DVec3,
    plane: Plane,
}

impl FramePose {
    /// Build a pose from a block center, yaw/pitch (radians) and the
    /// surface offset; the drawable plane stands `offset - 0.5` along the
    /// forward axis from the block center.
    pub fn new(center: DVec3, yaw: f64, pitch: f64, surface_offset: f64) -> Self {
        let rotation = DQuat::from_rotation_x(pitch) * DQuat::from_rotation_y(-yaw);
        let forward = rotation * DVec3::Z;
        let up = rotation * DVec3::Y;
        let right = rotation * DVec3::X;
        let origin = center + forward * (surface_offset - 0.5);
        let plane = Plane::from_point_normal(origin, forward);
        Self {
            center,
            yaw,
            pitch,
            surface_offset,
            rotation,
            forward,
            up,
            right,
            origin,
            plane,
        }
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn surface_offset(&self) -> f64 {
        self.surface_offset
    }

    pub fn rotation(&self) -> DQuat {
        self.rotation
    }

    /// Outward normal of the drawable surface.
    pub fn forward(&self) -> DVec3 {
        self.forward
    }

    pub fn up(&self) -> DVec3 {
        self.up
    }

    pub fn right(&self) -> DVec3 {
        self.right
    }

    /// Center of the drawable surface.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// The plane the canvas is drawn on.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Map a world point into centered surface UV (±0.5 at the canvas
    /// edges). 3D up runs toward negative V. Points off the plane project
    /// orthogonally onto it.
    pub fn to_surface_uv(&self, world: DVec3) -> Point {
        let local = self.rotation.conjugate() * (world - self.origin);
        Point::new(local.x, -local.y)
    }

    /// Exact algebraic inverse of [`Self::to_surface_uv`], landing on the
    /// drawable plane.
    pub fn from_surface_uv(&self, uv: Point) -> DVec3 {
        self.rotation * DVec3::new(uv.x, -uv.y, 0.0) + self.origin
    }

    /// True when a viewer looking along `view_dir` faces the drawable side.
    pub fn is_front_side(&self, view_dir: DVec3) -> bool {
        view_dir.dot(self.forward) <= 0.0
    }
}

/// Discrete content rotation within a frame: eight 45° steps, a 2×2 linear
/// map on centered UV with an exact inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FrameRotation {
    #[default]
    None,
    Deg45,
    Deg90,
    Deg135,
    Deg180,
    Deg225,
    Deg270,
    Deg315,
}

impl FrameRotation {
    pub const ALL: [FrameRotation; 8] = [
        FrameRotation::None,
        FrameRotation::Deg45,
        FrameRotation::Deg90,
        FrameRotation::Deg135,
        FrameRotation::Deg180,
        FrameRotation::Deg225,
        FrameRotation::Deg270,
        FrameRotation::Deg315,
    ];

    /// Rotation from a number of 45° steps (wraps past a full turn).
    pub fn from_steps(steps: u8) -> Self {
        Self::ALL[(steps % 8) as usize]
    }

    pub fn steps(self) -> u8 {
        Self::ALL.iter().position(|&r| r == self).unwrap_or(0) as u8
    }

    fn angle(self) -> f64 {
        f64::from(self.steps()) * FRAC_PI_4
    }

    /// Map a surface UV into content UV, undoing the content rotation.
    pub fn apply(self, uv: Point) -> Point {
        rotate(uv, -self.angle())
    }

    /// Inverse map: content UV back onto the physical surface.
    pub fn invert(self, uv: Point) -> Point {
        rotate(uv, self.angle())
    }
}

fn rotate(uv: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    Point::new(uv.x * cos - uv.y * sin, uv.x * sin + uv.y * cos)
}

/// A candidate canvas handed to the tracers: identity, pose, content
/// rotation and square pixel resolution.
#[derive(Debug, Clone, Copy)]
pub struct CanvasFrame {
    pub id: FrameId,
    pub pose: FramePose,
    pub rotation: FrameRotation,
    pub resolution: u32,
}

impl CanvasFrame {
    /// Default edge length of a canvas in pixels.
    pub const DEFAULT_RESOLUTION: u32 = 128;

    pub fn new(id: FrameId, pose: FramePose, rotation: FrameRotation, resolution: u32) -> Self {
        Self {
            id,
            pose,
            rotation,
            resolution,
        }
    }

    /// Content UV for a world point: pose mapping plus content rotation.
    pub fn content_uv(&self, world: DVec3) -> Point {
        self.rotation.apply(self.pose.to_surface_uv(world))
    }

    /// Centered UV to pixel coordinates.
    pub fn uv_to_pixel(&self, uv: Point) -> Point {
        let n = f64::from(self.resolution);
        Point::new((uv.x + 0.5) * n, (uv.y + 0.5) * n)
    }

    /// Pixel coordinates back to centered UV.
    pub fn pixel_to_uv(&self, px: Point) -> Point {
        let n = f64::from(self.resolution);
        Point::new(px.x / n - 0.5, px.y / n - 0.5)
    }

    /// World position of a pixel coordinate on the drawable plane.
    pub fn pixel_to_world(&self, px: Point) -> DVec3 {
        self.pose
            .from_surface_uv(self.rotation.invert(self.pixel_to_uv(px)))
    }

    /// Whether a pixel-space point lies on the canvas, `[0, resolution)` on
    /// both axes.
    pub fn contains_pixel(&self, px: Point) -> bool {
        let n = f64::from(self.resolution);
        px.x >= 0.0 && px.y >= 0.0 && px.x < n && px.y < n
    }
}
