//! Parametric 3D lines.

use glam::DVec3;

/// A parametric line (or segment) in 3D: an origin plus a direction that is
/// not required to be unit length. The far endpoint is `origin + direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Line3 {
    /// Create a line from an origin and a direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Line spanning two points; the direction is `to - from`.
    pub fn between(from: DVec3, to: DVec3) -> Self {
        Self::new(from, to - from)
    }

    /// The far endpoint `origin + direction`.
    pub fn target(&self) -> DVec3 {
        self.origin + self.direction
    }

    /// Length of the segment from origin to target.
    pub fn length(&self) -> f64 {
        self.direction.length()
    }

    /// Project a point onto the infinite line.
    ///
    /// Callers must not pass a zero direction.
    pub fn closest_point(&self, point: DVec3) -> DVec3 {
        let t = (point - self.origin).dot(self.direction) / self.direction.length_squared();
        self.origin + self.direction * t
    }

    /// Project both endpoints of `other` onto this line, yielding the
    /// best-fit sub-segment of this line covering `other`.
    pub fn closest_segment(&self, other: &Line3) -> Line3 {
        Line3::between(
            self.closest_point(other.origin),
            self.closest_point(other.target()),
        )
    }
}
