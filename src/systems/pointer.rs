use bevy_ecs::prelude::*;
use organ_console_ecs::{SceneNode, WorldPose};
use organ_console_ui3d::{pick_nearest, Aabb, Ray};

use crate::components::{BoxShape, Controller, Emissive, Grabbable};
use crate::resources::{InteractionSettings, Intersected, SceneGroup};

/// Rebuild the hover set: clear last frame's highlights, then highlight the
/// nearest grabbable on each free controller's ray and size its pointer line.
/// Objects held by a controller are no longer scene group children and are skipped.
pub fn highlight_pointed(
    settings: Res<InteractionSettings>,
    group: Res<SceneGroup>,
    mut intersected: ResMut<Intersected>,
    mut controllers: Query<(&mut Controller, &WorldPose)>,
    grabbables: Query<(Entity, &WorldPose, &BoxShape, &SceneNode), With<Grabbable>>,
    mut emissive: Query<&mut Emissive>,
) {
    for entity in intersected.0.drain(..) {
        if let Ok(mut glow) = emissive.get_mut(entity) {
            glow.0.x = 0.0;
        }
    }

    for (mut controller, pose) in controllers.iter_mut() {
        if controller.selected.is_some() || !controller.tracked {
            continue;
        }
        let ray = Ray::from_matrix(&pose.0);
        let candidates = grabbables
            .iter()
            .filter(|(_, _, _, node)| node.parent == Some(group.0))
            .map(|(entity, pose, shape, _)| (entity, Aabb::from_transformed_box(&pose.0, shape.size)));

        match pick_nearest(&ray, candidates) {
            Some((object, hit)) => {
                if let Ok(mut glow) = emissive.get_mut(object) {
                    glow.0.x = 1.0;
                }
                intersected.0.push(object);
                controller.line_length = hit.distance;
            }
            None => controller.line_length = settings.pointer_length,
        }
    }
}
