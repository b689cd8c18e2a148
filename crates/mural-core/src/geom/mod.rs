//! Geometry kernel: parametric lines, planes, clipping and rotation helpers.

mod clip;
mod line;
mod plane;

pub use clip::{clip_square, HALF_EXTENT};
pub use line::Line3;
pub use plane::Plane;

use glam::{DQuat, DVec3};

/// Tolerance for parallelism and degeneracy checks.
pub const EPSILON: f64 = 1e-9;

/// Recover the rotation axis and angle of a quaternion.
///
/// When the rotation is degenerate (angle near zero or a full turn) the axis
/// is mathematically undefined; the canonical +X axis is returned by policy.
pub fn axis_angle(q: DQuat) -> (DVec3, f64) {
    let (axis, angle) = q.to_axis_angle();
    let from_full_turn = (angle.abs() - std::f64::consts::TAU).abs();
    if angle.abs() < EPSILON || from_full_turn < EPSILON || !axis.is_finite() {
        (DVec3::X, angle)
    } else {
        (axis, angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    #[test]
    fn test_axis_angle_roundtrip() {
        let axis = DVec3::new(0.0, 1.0, 0.0);
        let q = DQuat::from_axis_angle(axis, FRAC_PI_2);
        let (a, angle) = axis_angle(q);
        assert!((a - axis).length() < 1e-12);
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_axis_angle_degenerate_identity() {
        let (axis, _) = axis_angle(DQuat::IDENTITY);
        assert_eq!(axis, DVec3::X);
    }

    #[test]
    fn test_axis_angle_degenerate_full_turn() {
        let q = DQuat::from_axis_angle(DVec3::new(0.0, 0.0, 1.0), TAU);
        let (axis, _) = axis_angle(q);
        assert_eq!(axis, DVec3::X);
    }
}
