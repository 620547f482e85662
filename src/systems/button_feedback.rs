use bevy_ecs::prelude::*;
use organ_console_audio::SoundId;
use organ_console_ui3d::ButtonEvent;
use tracing::{debug, info};

use crate::components::Button;
use crate::resources::{ActionQueue, AudioRequests, ButtonLog, ButtonRecord, FrameContext};

/// Phase B: commit button states, queue sounds and actions on state edges.
///
/// Also binds the shared sounds on the first session frame and keeps the
/// listener on the head.
pub fn emit_button_feedback(
    ctx: Res<FrameContext>,
    mut audio: ResMut<AudioRequests>,
    mut actions: ResMut<ActionQueue>,
    mut log: ResMut<ButtonLog>,
    mut buttons: Query<&mut Button>,
) {
    if ctx.frame.session_active {
        if !audio.bound {
            audio.bound = true;
            audio.bind_now = true;
            info!("xr session detected; binding button sounds");
        }
        audio.listener = Some(ctx.frame.camera_position);
    }

    for mut button in buttons.iter_mut() {
        let Some(event) = button.machine.commit() else {
            continue;
        };
        debug!(button = %button.name, ?event, "button edge");

        let sound = match event {
            ButtonEvent::Press => {
                actions.0.push(button.action);
                SoundId::ButtonPress
            }
            ButtonEvent::Release => SoundId::ButtonRelease,
        };
        if audio.bound {
            audio.plays.push(sound);
        }
        log.0.push(ButtonRecord {
            tick: ctx.tick,
            button: button.name.clone(),
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ButtonAction;
    use organ_console_core::FrameTick;
    use organ_console_ecs::{build_frame_schedule, run_frame, FrameSchedule};
    use organ_console_input::XrFrame;
    use organ_console_ui3d::{ButtonConfig, PushButton};

    const DT: f32 = 1.0 / 72.0;
    /// Deep enough to bottom out a default button in one frame.
    const DEEP: f32 = 0.03;

    struct Rig {
        world: World,
        schedules: bevy_ecs::schedule::Schedules,
        button: Entity,
        y: f32,
        tick: u64,
    }

    impl Rig {
        fn new() -> Self {
            let mut world = World::default();
            world.insert_resource(FrameContext::default());
            world.insert_resource(AudioRequests::default());
            world.insert_resource(ActionQueue::default());
            world.insert_resource(ButtonLog::default());
            let button = world
                .spawn(Button {
                    name: "reset".to_owned(),
                    machine: PushButton::new(ButtonConfig::default()).with_resting_y(0.04),
                    action: ButtonAction::ResetModelColor,
                })
                .id();

            let mut schedules = build_frame_schedule();
            if let Some(schedule) = schedules.get_mut(FrameSchedule) {
                schedule.add_systems(emit_button_feedback);
            }
            Self {
                world,
                schedules,
                button,
                y: 0.04,
                tick: 0,
            }
        }

        /// Run Phase A by hand, then the feedback system.
        fn frame(&mut self, session_active: bool, depths: &[f32]) {
            {
                let mut ctx = self.world.resource_mut::<FrameContext>();
                ctx.frame = XrFrame {
                    session_active,
                    ..Default::default()
                };
                ctx.dt = DT;
                ctx.tick = FrameTick(self.tick);
            }
            if let Some(mut button) = self.world.get_mut::<Button>(self.button) {
                self.y = button.machine.travel(self.y, depths, DT);
            }
            run_frame(&mut self.world, &mut self.schedules, FrameTick(self.tick));
            self.tick += 1;
        }

        fn take_plays(&mut self) -> Vec<SoundId> {
            std::mem::take(&mut self.world.resource_mut::<AudioRequests>().plays)
        }

        fn take_actions(&mut self) -> Vec<ButtonAction> {
            std::mem::take(&mut self.world.resource_mut::<ActionQueue>().0)
        }
    }

    #[test]
    fn press_and_release_edges_queue_one_sound_each() {
        let mut rig = Rig::new();
        rig.frame(true, &[]);
        assert!(rig.take_plays().is_empty());

        rig.frame(true, &[DEEP]);
        assert_eq!(rig.take_plays(), vec![SoundId::ButtonPress]);
        assert_eq!(rig.take_actions(), vec![ButtonAction::ResetModelColor]);

        for _ in 0..3 {
            rig.frame(true, &[DEEP]);
        }
        assert!(rig.take_plays().is_empty());
        assert!(rig.take_actions().is_empty());

        rig.frame(true, &[]);
        assert_eq!(rig.take_plays(), vec![SoundId::ButtonRelease]);

        // Still travelling back up: no second release.
        rig.frame(true, &[]);
        assert!(rig.take_plays().is_empty());
    }

    #[test]
    fn edges_before_binding_run_actions_silently() {
        let mut rig = Rig::new();
        rig.frame(false, &[DEEP]);
        assert!(!rig.world.resource::<AudioRequests>().bound);
        assert!(rig.take_plays().is_empty());
        assert_eq!(rig.take_actions(), vec![ButtonAction::ResetModelColor]);

        rig.frame(false, &[]);
        assert!(rig.take_plays().is_empty());
        assert_eq!(rig.world.resource::<ButtonLog>().0.len(), 2);

        // Session appears: sounds bind and the next press is audible.
        rig.frame(true, &[]);
        let requests = rig.world.resource::<AudioRequests>();
        assert!(requests.bound && requests.bind_now);
        rig.take_plays();

        while rig.y < 0.04 {
            rig.frame(true, &[]);
        }
        rig.frame(true, &[]);
        rig.take_plays();
        rig.frame(true, &[DEEP]);
        assert_eq!(rig.take_plays(), vec![SoundId::ButtonPress]);
    }
}
