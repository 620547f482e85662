use bevy_ecs::prelude::*;
use glam::Vec3;
use organ_console_ecs::{SceneNode, WorldPose};
use tracing::info;

use crate::components::{BoxShape, Emissive, Grabbable, OrganMesh};
use crate::resources::{AssetInbox, InteractionSettings, LoadedAsset, OrganMaterial, SceneGroup};

/// Spawn grabbable organ meshes and apply textures that finished loading.
pub fn attach_loaded_assets(
    mut commands: Commands,
    mut inbox: ResMut<AssetInbox>,
    mut material: ResMut<OrganMaterial>,
    settings: Res<InteractionSettings>,
    group: Res<SceneGroup>,
) {
    for asset in inbox.0.drain(..) {
        match asset {
            LoadedAsset::Model(model) => {
                let scale = settings.model_scale;
                for mesh in model.meshes {
                    let mut size = mesh.size();
                    if !size.is_finite() || size.min_element() <= 0.0 {
                        size = Vec3::ONE;
                    }
                    let node = SceneNode::at(settings.model_position + mesh.center() * scale)
                        .with_uniform_scale(scale)
                        .with_parent(group.0);
                    commands.spawn((
                        node,
                        WorldPose::default(),
                        BoxShape::new(size),
                        Grabbable,
                        Emissive::default(),
                        OrganMesh { name: mesh.name },
                    ));
                }
                info!("organ model attached");
            }
            LoadedAsset::Texture(texture) => {
                material.texture = Some((texture.width, texture.height));
                info!(width = texture.width, height = texture.height, "organ texture applied");
            }
        }
    }
}
