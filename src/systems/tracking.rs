use bevy_ecs::prelude::*;
use organ_console_ecs::SceneNode;

use crate::components::Controller;
use crate::resources::FrameContext;

/// Copy this frame's controller poses onto the controller nodes.
pub fn sync_controllers(ctx: Res<FrameContext>, mut controllers: Query<(&mut Controller, &mut SceneNode)>) {
    for (mut controller, mut node) in controllers.iter_mut() {
        match ctx.frame.controller(controller.side) {
            Some(pose) => {
                controller.tracked = true;
                node.translation = pose.position;
                node.rotation = pose.rotation;
            }
            None => controller.tracked = false,
        }
    }
}
