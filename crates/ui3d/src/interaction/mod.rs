//! 3D UI Interaction
//!
//! Geometry tests used by the hand and controller systems: fingertip spheres
//! against boxes, and controller rays against boxes.

pub mod raycaster;
pub mod touch;

pub use raycaster::{pick_nearest, Aabb, PointerHit, Ray, DEFAULT_POINTER_LENGTH};
pub use touch::{penetration_depth, sphere_touches_point, touches_box, TOUCH_RADIUS};
