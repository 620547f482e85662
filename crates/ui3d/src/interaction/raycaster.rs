//! Controller raycasting against world-space boxes

use glam::{Mat4, Quat, Vec3};

/// Pointer line length when the ray hits nothing.
pub const DEFAULT_POINTER_LENGTH: f32 = 5.0;

/// Result of a pointer raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    /// Position where the ray hit the box
    pub position: Vec3,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from center position and size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// World bound of a local box of `size` centred on the origin of `world`.
    ///
    /// All eight corners are transformed, so rotated or scaled boxes grow their bound.
    pub fn from_transformed_box(world: &Mat4, size: Vec3) -> Self {
        let half = size * 0.5;
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { -half.x } else { half.x },
                if i & 2 == 0 { -half.y } else { half.y },
                if i & 4 == 0 { -half.z } else { half.z },
            );
            let p = world.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Self { min, max }
    }

    /// Closest point inside the box to `point`.
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Test if a ray intersects this AABB
    /// Returns distance to intersection point if hit
    pub fn ray_intersection(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(1.0 / ray_dir.x, 1.0 / ray_dir.y, 1.0 / ray_dir.z);

        let t1 = (self.min.x - ray_origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray_origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray_origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray_origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray_origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray_origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Entire box is behind the origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        // Origin inside the box
        let distance = if tmin < 0.0 { tmax } else { tmin };

        Some(distance)
    }
}

/// A pointer ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Ray from a tracked pose, pointing down the pose's local -Z axis.
    pub fn from_pose(position: Vec3, rotation: Quat) -> Self {
        Self {
            origin: position,
            direction: (rotation * Vec3::NEG_Z).normalize(),
        }
    }

    /// Ray from a world matrix (translation + rotation, scale ignored).
    pub fn from_matrix(world: &Mat4) -> Self {
        let (_, rotation, translation) = world.to_scale_rotation_translation();
        Self::from_pose(translation, rotation)
    }

    /// Intersect with a box.
    pub fn cast(&self, aabb: &Aabb) -> Option<PointerHit> {
        aabb.ray_intersection(self.origin, self.direction)
            .map(|distance| PointerHit {
                position: self.origin + self.direction * distance,
                distance,
            })
    }
}

/// Nearest candidate hit by `ray`, if any.
pub fn pick_nearest<T, I>(ray: &Ray, candidates: I) -> Option<(T, PointerHit)>
where
    I: IntoIterator<Item = (T, Aabb)>,
{
    let mut closest: Option<(T, PointerHit)> = None;
    for (id, aabb) in candidates {
        let Some(hit) = ray.cast(&aabb) else {
            continue;
        };
        let nearer = closest
            .as_ref()
            .map_or(true, |(_, best)| hit.distance < best.distance);
        if nearer {
            closest = Some((id, hit));
        }
    }
    closest
}
