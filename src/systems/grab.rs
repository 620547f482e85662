use bevy_ecs::prelude::*;
use organ_console_ecs::{reparent_preserving_world, SceneNode, WorldPose};
use organ_console_input::InputSource;
use organ_console_ui3d::{pick_nearest, Aabb, Ray};
use tracing::debug;

use crate::components::{BoxShape, Controller, Emissive, Grabbable};
use crate::resources::{SceneGroup, XrInput};

/// Select-start picks up the nearest grabbable on the controller ray;
/// select-end drops it back into the scene group. World placement is kept both ways.
///
/// Only direct children of the scene group can be picked, so an object held
/// by one controller is out of reach of the other.
pub fn grab_with_controllers(
    input: Res<XrInput>,
    group: Res<SceneGroup>,
    mut controllers: Query<(Entity, &mut Controller, &WorldPose), Without<Grabbable>>,
    mut grabbables: Query<
        (Entity, &WorldPose, &BoxShape, &mut SceneNode, &mut Emissive),
        With<Grabbable>,
    >,
    poses: Query<&WorldPose, (Without<Grabbable>, Without<Controller>)>,
) {
    let group_world = poses.get(group.0).map(|p| p.0).ok();

    for (controller_entity, mut controller, controller_pose) in controllers.iter_mut() {
        let source = InputSource::Select(controller.side);

        if input.0.just_released(source) {
            if let Some(object) = controller.selected.take() {
                if let Ok((_, _, _, mut node, mut emissive)) = grabbables.get_mut(object) {
                    if node.parent != Some(controller_entity) {
                        continue;
                    }
                    emissive.0.z = 0.0;
                    let object_world = controller_pose.0 * node.local_matrix();
                    reparent_preserving_world(
                        &mut node,
                        object_world,
                        group_world.map(|m| (group.0, m)),
                    );
                    debug!(?object, side = ?controller.side, "released");
                }
            }
        }

        if input.0.just_pressed(source) && controller.tracked && controller.selected.is_none() {
            let ray = Ray::from_matrix(&controller_pose.0);
            let candidates = grabbables
                .iter()
                .filter(|(_, _, _, node, _)| node.parent == Some(group.0))
                .map(|(entity, pose, shape, ..)| {
                    (entity, Aabb::from_transformed_box(&pose.0, shape.size))
                });
            let Some((object, hit)) = pick_nearest(&ray, candidates) else {
                continue;
            };
            if let Ok((_, pose, _, mut node, mut emissive)) = grabbables.get_mut(object) {
                emissive.0.z = 1.0;
                reparent_preserving_world(
                    &mut node,
                    pose.0,
                    Some((controller_entity, controller_pose.0)),
                );
                controller.selected = Some(object);
                debug!(?object, distance = hit.distance, side = ?controller.side, "grabbed");
            }
        }
    }
}
