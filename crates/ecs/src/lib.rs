#![warn(missing_docs)]
//! ECS schedule helpers wrapping `bevy_ecs` for the per-frame console update.

pub mod scene;

use bevy_ecs::schedule::{Schedule, ScheduleLabel, Schedules};
use bevy_ecs::world::World;
use organ_console_core::FrameTick;

pub use scene::{propagate_world_poses, reparent_preserving_world, SceneNode, WorldPose};

/// Label for the schedule that runs once per displayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ScheduleLabel)]
pub struct FrameSchedule;

/// Build the baseline frame schedule (empty; callers add their systems).
pub fn build_frame_schedule() -> Schedules {
    let mut schedules = Schedules::default();
    let mut schedule = Schedule::new(FrameSchedule);
    schedule.set_apply_final_deferred(true);
    schedules.insert(schedule);
    schedules
}

/// Run the frame schedule for a given tick.
pub fn run_frame(world: &mut World, schedules: &mut Schedules, tick: FrameTick) {
    tracing::trace!(tick = tick.0, "running frame schedule");
    if let Some(schedule) = schedules.get_mut(FrameSchedule) {
        schedule.run(world);
    }
}
