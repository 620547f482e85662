//! Per-world resources shared between systems and the frame driver.

use bevy_ecs::prelude::*;
use glam::Vec3;
use organ_console_assets::{ModelAsset, TextureAsset};
use organ_console_audio::SoundId;
use organ_console_core::{FrameTick, Rgb};
use organ_console_input::{InputState, XrFrame};
use organ_console_ui3d::ButtonEvent;

use crate::components::ButtonAction;

/// Snapshot and timing for the frame being run.
#[derive(Resource, Debug, Default)]
pub struct FrameContext {
    pub frame: XrFrame,
    /// Seconds since the previous frame.
    pub dt: f32,
    pub tick: FrameTick,
}

/// Edge-triggered select/pinch state.
#[derive(Resource, Debug, Default)]
pub struct XrInput(pub InputState);

/// Interaction tuning copied out of the config.
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub touch_radius: f32,
    pub pointer_length: f32,
    pub exit_delay_secs: f32,
    pub pinch_spawn: bool,
    pub spawn_size: f32,
    pub model_position: Vec3,
    pub model_scale: f32,
}

/// Sound work for the frame driver to hand to the audio manager.
#[derive(Resource, Debug, Default)]
pub struct AudioRequests {
    /// One-shot: sounds have been requested.
    pub bound: bool,
    /// Set on the frame binding happens; cleared by the driver.
    pub bind_now: bool,
    pub listener: Option<Vec3>,
    pub plays: Vec<SoundId>,
}

/// Button actions fired this frame.
#[derive(Resource, Debug, Default)]
pub struct ActionQueue(pub Vec<ButtonAction>);

/// Exit banner and the countdown to ending the session.
#[derive(Resource, Debug, Default)]
pub struct ExitSequence {
    pub banner_visible: bool,
    pub remaining: Option<f32>,
}

/// Requests the driver forwards to the XR host.
#[derive(Resource, Debug, Default)]
pub struct SessionRequests {
    pub end_session: bool,
}

/// Objects highlighted by a pointer this frame.
#[derive(Resource, Debug, Default)]
pub struct Intersected(pub Vec<Entity>);

/// Shared material of the organ model.
#[derive(Resource, Debug, Clone, Copy)]
pub struct OrganMaterial {
    pub tint: Rgb,
    /// Texture size once loaded.
    pub texture: Option<(u32, u32)>,
}

impl Default for OrganMaterial {
    fn default() -> Self {
        Self {
            tint: Rgb::WHITE,
            texture: None,
        }
    }
}

/// Two-hand scaling in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaling {
    pub object: Entity,
    pub initial_scale: f32,
    pub initial_distance: f32,
}

/// Cubes held by each hand's pinch, plus any active scaling.
#[derive(Resource, Debug, Default)]
pub struct PinchState {
    pub selected: [Option<Entity>; 2],
    pub scaling: Option<Scaling>,
}

/// Root node that grabbable content hangs from.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneGroup(pub Entity);

/// Decoded asset handed to the scene.
#[derive(Debug)]
pub enum LoadedAsset {
    Model(ModelAsset),
    Texture(TextureAsset),
}

/// Completed loads waiting to be attached.
#[derive(Resource, Debug, Default)]
pub struct AssetInbox(pub Vec<LoadedAsset>);

/// A button edge recorded for the event log.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonRecord {
    pub tick: FrameTick,
    pub button: String,
    pub event: ButtonEvent,
}

/// Button edges fired since the driver last drained the log.
#[derive(Resource, Debug, Default)]
pub struct ButtonLog(pub Vec<ButtonRecord>);
