//! 3D UI Components
//!
//! Widgets that live in world space and react to hand input.

pub mod button;

pub use button::{
    resolve_travel, transition, ButtonConfig, ButtonConfigError, ButtonEvent, ButtonState,
    ButtonStep, PushButton,
};
