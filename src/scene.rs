//! Builds the initial entity set from [`ConsoleConfig`].

use bevy_ecs::prelude::*;
use glam::Vec3;
use organ_console_ecs::{SceneNode, WorldPose};
use organ_console_input::Handedness;
use organ_console_ui3d::PushButton;
use tracing::debug;

use crate::components::{
    BaseColor, BoxShape, Button, ConsoleBody, Controller, NeedCalibration, OffsetFromCamera,
    Pressable,
};
use crate::config::ConsoleConfig;
use crate::resources::{
    ActionQueue, AssetInbox, AudioRequests, ButtonLog, ExitSequence, FrameContext,
    InteractionSettings, Intersected, OrganMaterial, PinchState, SceneGroup, SessionRequests,
    XrInput,
};

/// Entities created at setup.
#[derive(Debug, Clone)]
pub struct SceneHandles {
    pub console: Entity,
    pub buttons: Vec<Entity>,
    pub controllers: [Entity; 2],
    pub group: Entity,
}

/// Insert resources and spawn the console, its buttons, the controllers and the scene group.
pub fn setup_scene(world: &mut World, config: &ConsoleConfig) -> SceneHandles {
    world.insert_resource(FrameContext::default());
    world.insert_resource(XrInput::default());
    world.insert_resource(InteractionSettings {
        touch_radius: config.interaction.touch_radius,
        pointer_length: config.interaction.pointer_length,
        exit_delay_secs: config.interaction.exit_delay_secs,
        pinch_spawn: config.interaction.pinch_spawn,
        spawn_size: config.interaction.spawn_size,
        model_position: config.assets.model_position,
        model_scale: config.assets.model_scale,
    });
    world.insert_resource(AudioRequests::default());
    world.insert_resource(ActionQueue::default());
    world.insert_resource(ExitSequence::default());
    world.insert_resource(SessionRequests::default());
    world.insert_resource(Intersected::default());
    world.insert_resource(OrganMaterial {
        tint: config.assets.model_tint,
        texture: None,
    });
    world.insert_resource(PinchState::default());
    world.insert_resource(AssetInbox::default());
    world.insert_resource(ButtonLog::default());

    let group = world
        .spawn((SceneNode::default(), WorldPose::default()))
        .id();
    world.insert_resource(SceneGroup(group));

    let console = world
        .spawn((
            SceneNode::at(config.console.position),
            WorldPose::default(),
            BoxShape::new(config.console.size),
            BaseColor(config.console.color),
            ConsoleBody,
            NeedCalibration,
            OffsetFromCamera(config.calibration_offset),
        ))
        .id();

    let buttons = config
        .buttons
        .iter()
        .map(|def| {
            debug!(button = %def.name, action = ?def.action, "spawning button");
            world
                .spawn((
                    SceneNode::at(def.position).with_parent(console),
                    WorldPose::default(),
                    BoxShape::new(def.size),
                    BaseColor(def.color),
                    Pressable,
                    Button {
                        name: def.name.clone(),
                        machine: PushButton::new(def.tuning()),
                        action: def.action,
                    },
                ))
                .id()
        })
        .collect();

    let controllers = Handedness::BOTH.map(|side| {
        world
            .spawn((
                SceneNode::at(Vec3::ZERO),
                WorldPose::default(),
                Controller::new(side, config.interaction.pointer_length),
            ))
            .id()
    });

    SceneHandles {
        console,
        buttons,
        controllers,
        group,
    }
}
