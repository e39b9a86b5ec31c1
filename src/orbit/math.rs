//! Rotation helpers shared by the controller and the engine

use std::f32::consts::PI;

use bevy::math::{Quat, Vec2, Vec3};

/// Direction the centred tile faces
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Rotation carrying `from` toward `to`, scaled by `angle_factor`.
///
/// A factor of 1.0 yields the full alignment; smaller factors move part of
/// the way, larger ones overshoot. Both inputs are expected to be unit length.
pub fn rotation_between(from: Vec3, to: Vec3, angle_factor: f32) -> Quat {
    let axis = from.cross(to);

    if axis.length_squared() < 1e-12 {
        if from.dot(to) > 0.9999 {
            return Quat::IDENTITY;
        }
        // Opposite directions: any perpendicular axis works
        let helper = if from.dot(Vec3::Y).abs() > 0.9 {
            Vec3::X
        } else {
            Vec3::Y
        };
        let axis = from.cross(helper).normalize();
        return Quat::from_axis_angle(axis, PI * angle_factor);
    }

    let cos = from.dot(to).clamp(-1.0, 1.0);
    Quat::from_axis_angle(axis.normalize(), cos.acos() * angle_factor)
}

/// Project a pointer position (pixels) onto the virtual arcball.
///
/// Points near the centre land on a sphere of `radius`, points further out on
/// a hyperbolic sheet. The result is not normalised.
pub fn arcball_project(position: Vec2, viewport: Vec2, radius: f32) -> Vec3 {
    let scale = (viewport.x.max(viewport.y) - 1.0).max(1.0);

    let x = (2.0 * position.x - viewport.x - 1.0) / scale;
    let y = (2.0 * position.y - viewport.y - 1.0) / scale;

    let xy_sq = x * x + y * y;
    let r_sq = radius * radius;

    let z = if xy_sq <= r_sq / 2.0 {
        (r_sq - xy_sq).sqrt()
    } else {
        r_sq / xy_sq.sqrt()
    };

    Vec3::new(-x, y, z)
}

/// Angle (radians) of a unit quaternion
pub fn rotation_angle(q: Quat) -> f32 {
    q.w.clamp(-1.0, 1.0).acos() * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn full_factor_aligns_vectors() {
        let from = Vec3::new(1.0, 2.0, -0.5).normalize();
        let q = rotation_between(from, FORWARD, 1.0);
        assert!((q * from).abs_diff_eq(FORWARD, EPS), "{:?}", q * from);
    }

    #[test]
    fn half_factor_rotates_half_way() {
        let q = rotation_between(Vec3::X, Vec3::Y, 0.5);
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((q * Vec3::X).abs_diff_eq(expected, EPS));
    }

    #[test]
    fn same_direction_is_identity() {
        let q = rotation_between(FORWARD, FORWARD, 1.0);
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn opposite_direction_uses_perpendicular_axis() {
        let from = Vec3::Z;
        let q = rotation_between(from, FORWARD, 1.0);
        assert!((q * from).abs_diff_eq(FORWARD, 1e-4), "{:?}", q * from);
        assert!((q.length() - 1.0).abs() < EPS);

        // Colinear with world-up falls back to world-right
        let q = rotation_between(Vec3::Y, Vec3::NEG_Y, 1.0);
        assert!((q * Vec3::Y).abs_diff_eq(Vec3::NEG_Y, 1e-4));
        assert!(!q.is_nan());
    }

    #[test]
    fn arcball_centre_points_out_of_screen() {
        let viewport = Vec2::new(801.0, 601.0);
        let p = arcball_project(Vec2::new(401.0, 301.0), viewport, 2.0);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), EPS), "{p:?}");
    }

    #[test]
    fn arcball_switches_to_hyperbola_outside_the_cap() {
        let viewport = Vec2::new(1001.0, 1001.0);
        let px = |x: f32| (x * 1000.0 + 1002.0) / 2.0;

        let inside = arcball_project(Vec2::new(px(0.6), 501.0), viewport, 2.0);
        assert!((inside.z - (4.0f32 - 0.36).sqrt()).abs() < 1e-3, "{inside:?}");
        assert!(inside.x < 0.0, "x is mirrored");

        let outside = arcball_project(Vec2::new(px(1.6), 501.0), viewport, 2.0);
        assert!((outside.z - 4.0 / 1.6).abs() < 1e-3, "{outside:?}");
    }

    #[test]
    fn angle_of_identity_is_zero() {
        assert!(rotation_angle(Quat::IDENTITY).abs() < EPS);
        let q = Quat::from_axis_angle(Vec3::Y, 0.7);
        assert!((rotation_angle(q) - 0.7).abs() < 1e-4);
    }
}
