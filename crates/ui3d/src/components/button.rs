//! Physical push button driven by fingertip penetration.
//!
//! Each frame runs in two phases:
//!
//! 1. [`PushButton::travel`] turns this frame's fingertip depths into a new
//!    vertical position and a pending [`ButtonState`].
//! 2. [`PushButton::commit`] compares the pending state against the previous
//!    frame and yields at most one [`ButtonEvent`].
//!
//! [`PushButton::step`] runs both phases back to back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a button is in its press/recover cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    /// At rest, untouched
    #[default]
    Resting,
    /// Being pushed but not yet at the bottom of travel
    Pressed,
    /// Pushed to the bottom of travel
    FullyPressed,
    /// Released and travelling back up
    Recovering,
}

/// Side effect emitted on a state edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonEvent {
    /// Entered [`ButtonState::FullyPressed`]: play the press sound and run the action.
    Press,
    /// Entered [`ButtonState::Recovering`]: play the release sound.
    Release,
}

/// Edge detection between two consecutive frame states.
pub fn transition(prev: ButtonState, next: ButtonState) -> Option<ButtonEvent> {
    match (prev, next) {
        (ButtonState::FullyPressed, ButtonState::FullyPressed) => None,
        (_, ButtonState::FullyPressed) => Some(ButtonEvent::Press),
        (ButtonState::Recovering, ButtonState::Recovering) => None,
        (_, ButtonState::Recovering) => Some(ButtonEvent::Release),
        _ => None,
    }
}

/// Rejected button configuration.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ButtonConfigError {
    /// A field is NaN or infinite.
    #[error("button field `{0}` must be finite")]
    NonFinite(&'static str),
    /// Travel cannot be negative.
    #[error("full_press_distance must be >= 0 (got {0})")]
    NegativeTravel(f32),
    /// Recovery must make progress.
    #[error("recovery_speed must be > 0 (got {0})")]
    NonPositiveRecovery(f32),
}

/// Static per-button tuning, in the button's parent space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Height of the pressable surface above the button origin.
    pub surface_y: f32,
    /// Maximum depression below the resting height.
    pub full_press_distance: f32,
    /// Upward travel speed in units per second once released.
    pub recovery_speed: f32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            surface_y: 0.05,
            full_press_distance: 0.02,
            recovery_speed: 0.4,
        }
    }
}

impl ButtonConfig {
    /// Check the preconditions the state machine relies on.
    pub fn validate(&self) -> Result<(), ButtonConfigError> {
        for (name, value) in [
            ("surface_y", self.surface_y),
            ("full_press_distance", self.full_press_distance),
            ("recovery_speed", self.recovery_speed),
        ] {
            if !value.is_finite() {
                return Err(ButtonConfigError::NonFinite(name));
            }
        }
        if self.full_press_distance < 0.0 {
            return Err(ButtonConfigError::NegativeTravel(self.full_press_distance));
        }
        if self.recovery_speed <= 0.0 {
            return Err(ButtonConfigError::NonPositiveRecovery(self.recovery_speed));
        }
        Ok(())
    }
}

/// Result of a full [`PushButton::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStep {
    /// New local height of the button.
    pub y: f32,
    /// State reached this frame.
    pub state: ButtonState,
    /// Edge-triggered side effect, if any.
    pub event: Option<ButtonEvent>,
}

/// Phase A as a pure function.
///
/// `depth` is the deepest fingertip penetration among touching hands, or None when
/// nothing touches the button.
pub fn resolve_travel(
    config: &ButtonConfig,
    resting_y: f32,
    current_y: f32,
    depth: Option<f32>,
    dt: f32,
) -> (f32, ButtonState) {
    match depth {
        None => {
            if current_y < resting_y {
                let y = (current_y + config.recovery_speed * dt).min(resting_y);
                (y, ButtonState::Recovering)
            } else {
                (resting_y, ButtonState::Resting)
            }
        }
        Some(depth) => {
            let mut y = current_y;
            if depth > 0.0 {
                y -= depth;
            }
            let floor = resting_y - config.full_press_distance;
            if y <= floor {
                (floor, ButtonState::FullyPressed)
            } else {
                (y, ButtonState::Pressed)
            }
        }
    }
}

/// Press/recover state machine for one button.
#[derive(Debug, Clone, PartialEq)]
pub struct PushButton {
    config: ButtonConfig,
    /// Captured from the first observed position.
    resting_y: Option<f32>,
    /// State committed at the end of the previous frame.
    state: ButtonState,
    /// Phase A output waiting for [`PushButton::commit`].
    pending: Option<ButtonState>,
}

impl PushButton {
    /// Create a button; the resting height is taken from the first update.
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            resting_y: None,
            state: ButtonState::Resting,
            pending: None,
        }
    }

    /// Builder: pin the resting height instead of capturing it lazily.
    pub fn with_resting_y(mut self, resting_y: f32) -> Self {
        self.resting_y = Some(resting_y);
        self
    }

    /// Button tuning.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Resting height, once known.
    pub fn resting_y(&self) -> Option<f32> {
        self.resting_y
    }

    /// Bottom of travel, once the resting height is known.
    pub fn floor_y(&self) -> Option<f32> {
        self.resting_y
            .map(|resting| resting - self.config.full_press_distance)
    }

    /// State committed by the last [`PushButton::commit`].
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Phase A: move the button for this frame and stage the resulting state.
    ///
    /// `depths` holds one penetration depth per hand whose fingertip touches the button;
    /// the deepest press wins.
    pub fn travel(&mut self, current_y: f32, depths: &[f32], dt: f32) -> f32 {
        let resting_y = *self.resting_y.get_or_insert(current_y);
        let depth = if depths.is_empty() {
            None
        } else {
            Some(depths.iter().copied().fold(f32::NEG_INFINITY, f32::max))
        };

        let (y, state) = resolve_travel(&self.config, resting_y, current_y, depth, dt);
        self.pending = Some(state);
        y
    }

    /// Phase B: commit the staged state and report the edge, if any.
    ///
    /// A frame without [`PushButton::travel`] commits [`ButtonState::Resting`].
    pub fn commit(&mut self) -> Option<ButtonEvent> {
        let next = self.pending.take().unwrap_or_default();
        let event = transition(self.state, next);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "button state change");
        }
        self.state = next;
        event
    }

    /// Run both phases for one frame.
    pub fn step(&mut self, current_y: f32, depths: &[f32], dt: f32) -> ButtonStep {
        let y = self.travel(current_y, depths, dt);
        let event = self.commit();
        ButtonStep {
            y,
            state: self.state,
            event,
        }
    }
}
