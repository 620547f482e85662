//! Pose snapshot handed over by the XR host once per frame.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Which hand or controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    /// Slot 0
    Left,
    /// Slot 1
    Right,
}

impl Handedness {
    /// Both sides in slot order.
    pub const BOTH: [Handedness; 2] = [Handedness::Left, Handedness::Right];

    /// Slot index into per-frame arrays.
    pub fn index(self) -> usize {
        match self {
            Handedness::Left => 0,
            Handedness::Right => 1,
        }
    }

    /// The opposite side.
    pub fn other(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

/// A tracked hand, reduced to its index fingertip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    /// Index fingertip position in world space.
    pub pointer: Vec3,
    /// Index fingertip orientation.
    #[serde(default = "identity")]
    pub rotation: Quat,
    /// Thumb and index are pinched together.
    #[serde(default)]
    pub pinching: bool,
}

/// A tracked controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerPose {
    /// Grip position in world space.
    pub position: Vec3,
    /// Grip orientation; the pointer ray runs down local -Z.
    #[serde(default = "identity")]
    pub rotation: Quat,
    /// Trigger held.
    #[serde(default)]
    pub select: bool,
}

fn identity() -> Quat {
    Quat::IDENTITY
}

/// Everything the console needs from the XR runtime for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrFrame {
    /// An immersive session is running.
    pub session_active: bool,
    /// Head (XR camera) position in world space.
    pub camera_position: Vec3,
    /// Tracked hands by slot; None when not tracked.
    pub hands: [Option<HandPose>; 2],
    /// Tracked controllers by slot; None when not tracked.
    pub controllers: [Option<ControllerPose>; 2],
}

impl XrFrame {
    /// Hand on `side`, if tracked.
    pub fn hand(&self, side: Handedness) -> Option<&HandPose> {
        self.hands[side.index()].as_ref()
    }

    /// Controller on `side`, if tracked.
    pub fn controller(&self, side: Handedness) -> Option<&ControllerPose> {
        self.controllers[side.index()].as_ref()
    }

    /// Fingertip positions of all tracked hands.
    pub fn pointers(&self) -> impl Iterator<Item = glam::Vec3> + '_ {
        self.hands.iter().flatten().map(|h| h.pointer)
    }
}
