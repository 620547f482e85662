#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod color;

use serde::{Deserialize, Serialize};

pub use color::Rgb;

/// Default frame rate used when the host does not dictate one (Quest-class headsets run at 72 Hz).
pub const DEFAULT_FPS: u32 = 72;

/// Monotonic frame counter driven by the host's animation loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Seconds per frame for the given frame rate (clamped to at least 1 fps).
pub fn frame_dt(fps: u32) -> f32 {
    1.0 / fps.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_tick_advances() {
        assert_eq!(FrameTick::ZERO.advance(3), FrameTick(3));
    }

    #[test]
    fn frame_dt_never_divides_by_zero() {
        assert_eq!(frame_dt(0), 1.0);
        assert!((frame_dt(72) - 1.0 / 72.0).abs() < f32::EPSILON);
    }
}
