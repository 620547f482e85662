use bevy_ecs::prelude::*;
use organ_console_core::Rgb;
use tracing::info;

use crate::components::ButtonAction;
use crate::resources::{
    ActionQueue, ExitSequence, FrameContext, InteractionSettings, OrganMaterial, SessionRequests,
};

/// Run queued button actions and advance the exit countdown.
pub fn run_button_actions(
    ctx: Res<FrameContext>,
    settings: Res<InteractionSettings>,
    mut queue: ResMut<ActionQueue>,
    mut material: ResMut<OrganMaterial>,
    mut exit: ResMut<ExitSequence>,
    mut session: ResMut<SessionRequests>,
) {
    // Countdown first so the triggering frame does not count towards the delay.
    if let Some(remaining) = exit.remaining {
        let remaining = remaining - ctx.dt;
        if remaining <= 0.0 {
            exit.remaining = None;
            exit.banner_visible = false;
            session.end_session = true;
            info!("exit delay elapsed; ending session");
        } else {
            exit.remaining = Some(remaining);
        }
    }

    for action in queue.0.drain(..) {
        match action {
            ButtonAction::None => {}
            ButtonAction::ResetModelColor => {
                material.tint = Rgb::WHITE;
                info!("model colour reset");
            }
            ButtonAction::ExitSession => {
                if exit.remaining.is_none() {
                    exit.banner_visible = true;
                    exit.remaining = Some(settings.exit_delay_secs);
                    info!(delay = settings.exit_delay_secs, "exit requested");
                }
            }
        }
    }
}
