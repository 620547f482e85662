//! Hand-pressable 3D UI for organ-console
//!
//! This crate holds the interaction logic for world-space widgets that are
//! touched by tracked fingertips or picked by controller rays. It knows nothing
//! about rendering or the ECS; callers feed it poses and apply the results.
//!
//! # Features
//!
//! - **Push buttons**: a press/recover state machine with edge-triggered events
//! - **Touch tests**: fingertip sphere against world-space boxes
//! - **Ray picking**: nearest-hit selection for controller pointers
//!
//! # Example
//!
//! ```rust
//! use organ_console_ui3d::{ButtonConfig, ButtonEvent, ButtonState, PushButton};
//!
//! let mut button = PushButton::new(ButtonConfig::default());
//!
//! // Fingertip 3 cm below the button surface.
//! let step = button.step(0.04, &[0.03], 1.0 / 72.0);
//! assert_eq!(step.state, ButtonState::FullyPressed);
//! assert_eq!(step.event, Some(ButtonEvent::Press));
//! ```

pub mod components;
pub mod interaction;

// Re-export commonly used types
pub use components::{
    resolve_travel, transition, ButtonConfig, ButtonConfigError, ButtonEvent, ButtonState,
    ButtonStep, PushButton,
};
pub use interaction::{
    penetration_depth, pick_nearest, sphere_touches_point, touches_box, Aabb, PointerHit, Ray,
    DEFAULT_POINTER_LENGTH, TOUCH_RADIUS,
};

/// Version of the UI3D crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
