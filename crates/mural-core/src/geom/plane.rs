//! Infinite 3D planes.

use glam::DVec3;

use super::{Line3, EPSILON};

/// An infinite plane stored as a unit normal `(a, b, c)` and signed distance
/// `d`, satisfying `normal · p + d = 0` for points `p` on the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub d: f64,
}

impl Plane {
    /// Plane through `point` with the given (not necessarily unit) normal.
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        let normal = normal.normalize();
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Plane through three points. `None` when the points are collinear.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a);
        if normal.length_squared() < EPSILON {
            return None;
        }
        Some(Self::from_point_normal(a, normal))
    }

    /// Signed distance from `point` to the plane.
    pub fn distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.d
    }

    /// Intersect with a parametric line.
    ///
    /// Solves `t = -(normal · origin + d) / (normal · direction)` and returns
    /// the point at `t`; `None` when the line is parallel to the plane within
    /// tolerance. The parameter is not restricted to the segment range.
    pub fn intersect_line(&self, line: &Line3) -> Option<DVec3> {
        let denom = self.normal.dot(line.direction);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = -(self.normal.dot(line.origin) + self.d) / denom;
        Some(line.origin + line.direction * t)
    }

    /// Intersect two planes into a line. `None` when the planes are parallel.
    pub fn intersect_plane(&self, other: &Plane) -> Option<Line3> {
        let direction = self.normal.cross(other.normal);
        let det = direction.length_squared();
        if det < EPSILON {
            return None;
        }
        let origin = (direction.cross(other.normal) * self.d
            + self.normal.cross(direction) * other.d)
            / det;
        Some(Line3::new(origin, direction))
    }
}
