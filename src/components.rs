//! Components attached to scene entities.

use bevy_ecs::prelude::*;
use glam::Vec3;
use organ_console_core::Rgb;
use organ_console_input::Handedness;
use organ_console_ui3d::PushButton;
use serde::{Deserialize, Serialize};

/// What a button does when it reaches the bottom of its travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Click only.
    #[default]
    None,
    /// Tint the organ model back to white.
    ResetModelColor,
    /// Show the exit banner, then end the XR session.
    ExitSession,
}

/// A push button living on the same entity as its scene node.
#[derive(Component, Debug)]
pub struct Button {
    /// Label used in logs and event records.
    pub name: String,
    /// Press/recover state machine.
    pub machine: PushButton,
    /// Fired once per transition into fully pressed.
    pub action: ButtonAction,
}

/// Entity takes part in fingertip touch tests.
#[derive(Component, Debug, Default)]
pub struct Pressable;

/// Entity must be re-anchored to the head once a session starts.
#[derive(Component, Debug, Default)]
pub struct NeedCalibration;

/// Offset from the head applied by calibration.
#[derive(Component, Debug, Clone, Copy)]
pub struct OffsetFromCamera(pub Vec3);

/// Box extents centred on the node origin, in local units.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoxShape {
    pub size: Vec3,
}

impl BoxShape {
    pub fn new(size: Vec3) -> Self {
        Self { size }
    }

    /// Radius of the sphere enclosing the box.
    pub fn bounding_radius(&self) -> f32 {
        self.size.length() * 0.5
    }
}

/// Diffuse colour of a mesh.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseColor(pub Rgb);

/// Emissive colour; red marks pointer hover, blue marks a grab.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Emissive(pub Vec3);

/// Can be picked up with a controller ray.
#[derive(Component, Debug, Default)]
pub struct Grabbable;

/// A tracked controller and its pointer line.
#[derive(Component, Debug)]
pub struct Controller {
    pub side: Handedness,
    /// Pose was supplied this frame.
    pub tracked: bool,
    /// Object currently held.
    pub selected: Option<Entity>,
    /// Length of the pointer line (hit distance or the default length).
    pub line_length: f32,
}

impl Controller {
    pub fn new(side: Handedness, line_length: f32) -> Self {
        Self {
            side,
            tracked: false,
            selected: None,
            line_length,
        }
    }
}

/// Cube created by a pinch.
#[derive(Component, Debug, Default)]
pub struct SpawnedCube;

/// One mesh of the loaded organ model.
#[derive(Component, Debug)]
pub struct OrganMesh {
    pub name: String,
}

/// The console body the buttons sit on.
#[derive(Component, Debug, Default)]
pub struct ConsoleBody;
