//! Minimal scene graph: local transforms with optional parents, propagated to world matrices.

use bevy_ecs::prelude::*;
use glam::{Mat4, Quat, Vec3};

/// Hierarchies deeper than this are treated as cyclic and cut off.
const MAX_DEPTH: usize = 32;

/// Local transform of a scene object relative to its parent (or the world when `parent` is None).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Scale relative to the parent.
    pub scale: Vec3,
    /// Parent entity, if attached.
    pub parent: Option<Entity>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}

impl SceneNode {
    /// Node at `translation` with identity rotation and unit scale.
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder: attach to a parent.
    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Builder: set rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set uniform scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Local matrix (parent space <- node space).
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Overwrite translation/rotation/scale from a matrix, keeping the parent link.
    pub fn set_from_matrix(&mut self, local: Mat4) {
        let (scale, rotation, translation) = local.to_scale_rotation_translation();
        self.scale = scale;
        self.rotation = rotation;
        self.translation = translation;
    }
}

/// Propagated world matrix (world space <- node space).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct WorldPose(pub Mat4);

impl Default for WorldPose {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl WorldPose {
    /// World-space origin of the node.
    pub fn translation(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    /// Uniform scale estimate (x axis length).
    pub fn scale_x(&self) -> f32 {
        self.0.x_axis.truncate().length()
    }

    /// Transform a world-space point into this node's local space.
    pub fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.0.inverse().transform_point3(point)
    }
}

/// Compose the world matrix for `entity` by walking its parent chain.
pub fn world_matrix(nodes: &Query<&SceneNode>, entity: Entity) -> Mat4 {
    let mut matrix = Mat4::IDENTITY;
    let mut current = Some(entity);
    let mut depth = 0;

    while let Some(e) = current {
        let Ok(node) = nodes.get(e) else {
            break;
        };
        matrix = node.local_matrix() * matrix;
        current = node.parent;
        depth += 1;
        if depth >= MAX_DEPTH {
            tracing::warn!(?entity, "scene hierarchy too deep or cyclic; truncating");
            break;
        }
    }

    matrix
}

/// Recompute every [`WorldPose`] from the [`SceneNode`] hierarchy.
pub fn propagate_world_poses(nodes: Query<&SceneNode>, mut poses: Query<(Entity, &mut WorldPose)>) {
    for (entity, mut pose) in poses.iter_mut() {
        let matrix = world_matrix(&nodes, entity);
        if pose.0 != matrix {
            pose.0 = matrix;
        }
    }
}

/// Re-attach a node under `new_parent` (or the world) without moving it in world space.
///
/// `object_world` is the node's current world matrix and `new_parent` carries the new parent's
/// world matrix.
pub fn reparent_preserving_world(
    node: &mut SceneNode,
    object_world: Mat4,
    new_parent: Option<(Entity, Mat4)>,
) {
    match new_parent {
        Some((parent, parent_world)) => {
            node.set_from_matrix(parent_world.inverse() * object_world);
            node.parent = Some(parent);
        }
        None => {
            node.set_from_matrix(object_world);
            node.parent = None;
        }
    }
}
