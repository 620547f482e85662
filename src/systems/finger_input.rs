use bevy_ecs::prelude::*;
use organ_console_ecs::{SceneNode, WorldPose};
use organ_console_ui3d::{penetration_depth, touches_box, Aabb};

use crate::components::{BoxShape, Button, Pressable};
use crate::resources::{FrameContext, InteractionSettings};

/// Phase A: move every pressable button according to the fingertips touching it.
///
/// Depth is measured in the button's own frame, so a tilted console still
/// presses along its local up axis.
pub fn press_buttons_with_fingers(
    ctx: Res<FrameContext>,
    settings: Res<InteractionSettings>,
    mut buttons: Query<(&mut Button, &mut SceneNode, &WorldPose, &BoxShape), With<Pressable>>,
) {
    let mut depths = Vec::with_capacity(2);
    for (mut button, mut node, pose, shape) in buttons.iter_mut() {
        let bounds = Aabb::from_transformed_box(&pose.0, shape.size);
        let surface_y = button.machine.config().surface_y;

        depths.clear();
        depths.extend(
            ctx.frame
                .pointers()
                .filter(|&tip| touches_box(tip, settings.touch_radius, &bounds))
                .map(|tip| penetration_depth(surface_y, pose.world_to_local(tip).y)),
        );

        node.translation.y = button.machine.travel(node.translation.y, &depths, ctx.dt);
    }
}
