#![warn(missing_docs)]
//! XR input: per-frame pose snapshots, the host seam, and edge-triggered button state.

mod frame;
mod host;
mod scripted;

pub use frame::{ControllerPose, HandPose, Handedness, XrFrame};
pub use host::XrHost;
pub use scripted::{ScriptError, ScriptedXrHost};

use std::collections::HashSet;

/// A digital input that can be held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Controller trigger ("select").
    Select(Handedness),
    /// Thumb-index pinch of a tracked hand.
    Pinch(Handedness),
}

/// Input state tracking for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Sources currently held.
    held: HashSet<InputSource>,
    /// Sources pressed this frame (edge-triggered).
    just_pressed: HashSet<InputSource>,
    /// Sources released this frame (edge-triggered).
    just_released: HashSet<InputSource>,

    /// Whether the XR session is running this frame.
    pub session_active: bool,
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset per-frame edges (called by [`InputState::update`]).
    pub fn begin_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Derive held/edge state from this frame's snapshot.
    ///
    /// Untracked hands and controllers count as released.
    pub fn update(&mut self, frame: &XrFrame) {
        self.begin_frame();

        self.session_active = frame.session_active;

        for side in Handedness::BOTH {
            let select = frame.controller(side).map_or(false, |c| c.select);
            self.set(InputSource::Select(side), select);

            let pinch = frame.hand(side).map_or(false, |h| h.pinching);
            self.set(InputSource::Pinch(side), pinch);
        }
    }

    fn set(&mut self, source: InputSource, down: bool) {
        if down {
            if self.held.insert(source) {
                self.just_pressed.insert(source);
            }
        } else if self.held.remove(&source) {
            self.just_released.insert(source);
        }
    }

    /// Check if a source is currently held.
    pub fn pressed(&self, source: InputSource) -> bool {
        self.held.contains(&source)
    }

    /// Check if a source was pressed this frame.
    pub fn just_pressed(&self, source: InputSource) -> bool {
        self.just_pressed.contains(&source)
    }

    /// Check if a source was released this frame.
    pub fn just_released(&self, source: InputSource) -> bool {
        self.just_released.contains(&source)
    }
}
