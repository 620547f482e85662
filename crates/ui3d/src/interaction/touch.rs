//! Fingertip touch tests.

use super::raycaster::Aabb;
use glam::Vec3;

/// Radius of the sphere around the index fingertip used for touch tests.
pub const TOUCH_RADIUS: f32 = 0.01;

/// Whether a fingertip sphere overlaps a world-space box.
pub fn touches_box(pointer: Vec3, radius: f32, aabb: &Aabb) -> bool {
    aabb.closest_point(pointer).distance_squared(pointer) <= radius * radius
}

/// How far below the button surface the fingertip is, in the button's local space.
///
/// Positive values push the button down.
pub fn penetration_depth(surface_y: f32, local_pointer_y: f32) -> f32 {
    surface_y - local_pointer_y
}

/// Whether `point` lies strictly inside the sphere at `center`.
pub fn sphere_touches_point(center: Vec3, radius: f32, point: Vec3) -> bool {
    point.distance(center) < radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingertip_just_above_box_touches() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::new(0.08, 0.1, 0.08));
        assert!(touches_box(Vec3::new(0.0, 0.059, 0.0), TOUCH_RADIUS, &aabb));
        assert!(!touches_box(Vec3::new(0.0, 0.061, 0.0), TOUCH_RADIUS, &aabb));
        assert!(touches_box(Vec3::ZERO, TOUCH_RADIUS, &aabb));
    }

    #[test]
    fn depth_is_positive_below_surface() {
        assert!((penetration_depth(0.05, 0.02) - 0.03).abs() < 1e-6);
        assert!(penetration_depth(0.05, 0.06) < 0.0);
    }

    #[test]
    fn sphere_point_test_is_strict() {
        assert!(sphere_touches_point(Vec3::ZERO, 1.0, Vec3::new(0.5, 0.0, 0.0)));
        assert!(!sphere_touches_point(Vec3::ZERO, 1.0, Vec3::new(1.0, 0.0, 0.0)));
    }
}
