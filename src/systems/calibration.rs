use bevy_ecs::prelude::*;
use organ_console_ecs::SceneNode;
use tracing::info;

use crate::components::{NeedCalibration, OffsetFromCamera};
use crate::resources::FrameContext;

/// Snap uncalibrated entities to `head + offset` once a session is running.
///
/// The marker is removed afterwards, so each entity calibrates exactly once.
pub fn calibrate_to_head(
    mut commands: Commands,
    ctx: Res<FrameContext>,
    mut pending: Query<(Entity, &OffsetFromCamera, &mut SceneNode), With<NeedCalibration>>,
) {
    if !ctx.frame.session_active {
        return;
    }
    let head = ctx.frame.camera_position;
    for (entity, offset, mut node) in pending.iter_mut() {
        node.translation = head + offset.0;
        commands.entity(entity).remove::<NeedCalibration>();
        info!(?entity, position = ?node.translation, "calibrated to head");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use organ_console_core::FrameTick;
    use organ_console_ecs::{build_frame_schedule, run_frame, FrameSchedule};

    fn world_with_console() -> (World, Entity) {
        let mut world = World::default();
        world.insert_resource(FrameContext::default());
        let console = world
            .spawn((
                SceneNode::at(Vec3::new(0.0, 1.0, -0.3)),
                NeedCalibration,
                OffsetFromCamera(Vec3::new(0.0, -0.6, -0.3)),
            ))
            .id();
        (world, console)
    }

    #[test]
    fn waits_for_session_then_snaps_once() {
        let (mut world, console) = world_with_console();
        let mut schedules = build_frame_schedule();
        if let Some(schedule) = schedules.get_mut(FrameSchedule) {
            schedule.add_systems(calibrate_to_head);
        }

        run_frame(&mut world, &mut schedules, FrameTick(0));
        let node = world.get::<SceneNode>(console).expect("node");
        assert_eq!(node.translation, Vec3::new(0.0, 1.0, -0.3));

        {
            let mut ctx = world.resource_mut::<FrameContext>();
            ctx.frame.session_active = true;
            ctx.frame.camera_position = Vec3::new(0.5, 1.6, 0.0);
        }
        run_frame(&mut world, &mut schedules, FrameTick(1));
        let node = world.get::<SceneNode>(console).expect("node");
        assert!((node.translation - Vec3::new(0.5, 1.0, -0.3)).length() < 1e-6);
        assert!(world.get::<NeedCalibration>(console).is_none());

        world.resource_mut::<FrameContext>().frame.camera_position = Vec3::new(3.0, 1.6, 3.0);
        run_frame(&mut world, &mut schedules, FrameTick(2));
        let node = world.get::<SceneNode>(console).expect("node");
        assert!((node.translation - Vec3::new(0.5, 1.0, -0.3)).length() < 1e-6);
    }
}
