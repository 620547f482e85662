//! Frame systems, in the order they run.

pub mod actions;
pub mod assets;
pub mod button_feedback;
pub mod calibration;
pub mod finger_input;
pub mod grab;
pub mod pinch;
pub mod pointer;
pub mod tracking;

use bevy_ecs::schedule::{IntoSystemConfigs, Schedules};
use organ_console_ecs::{build_frame_schedule, propagate_world_poses, FrameSchedule};

/// Frame schedule with every console system chained in order.
pub fn console_schedules() -> Schedules {
    let mut schedules = build_frame_schedule();
    if let Some(schedule) = schedules.get_mut(FrameSchedule) {
        schedule.add_systems(
            (
                tracking::sync_controllers,
                calibration::calibrate_to_head,
                propagate_world_poses,
                finger_input::press_buttons_with_fingers,
                button_feedback::emit_button_feedback,
                actions::run_button_actions,
                grab::grab_with_controllers,
                pointer::highlight_pointed,
                pinch::pinch_cubes,
                assets::attach_loaded_assets,
                propagate_world_poses,
            )
                .chain(),
        );
    }
    schedules
}
