//! The seam between the console and whatever drives the XR runtime.

use crate::XrFrame;

/// Supplies pose snapshots and accepts session control requests.
pub trait XrHost {
    /// Produce the snapshot for the next frame, `dt` seconds after the previous one.
    fn poll_frame(&mut self, dt: f32) -> XrFrame;

    /// Ask the runtime to end the immersive session.
    fn end_session(&mut self);

    /// The host has nothing more to show (scripted hosts run out of steps).
    fn is_finished(&self) -> bool {
        false
    }
}
