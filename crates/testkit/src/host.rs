//! A host that replays frames pushed by the test, plus frame builders.

use glam::{Quat, Vec3};
use organ_console_input::{ControllerPose, HandPose, Handedness, XrFrame, XrHost};
use std::collections::VecDeque;

/// XR host fed frame-by-frame from a test.
///
/// When the queue runs dry the last frame is repeated. After
/// [`XrHost::end_session`] every frame reports an inactive session.
#[derive(Debug, Default)]
pub struct QueuedXrHost {
    queue: VecDeque<XrFrame>,
    last: XrFrame,
    end_requests: usize,
    finish_when_empty: bool,
}

impl QueuedXrHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report finished once the queue is drained.
    pub fn finish_when_empty(mut self) -> Self {
        self.finish_when_empty = true;
        self
    }

    /// Queue one frame.
    pub fn push(&mut self, frame: XrFrame) {
        self.queue.push_back(frame);
    }

    /// Queue the same frame `count` times.
    pub fn push_repeated(&mut self, frame: XrFrame, count: usize) {
        for _ in 0..count {
            self.queue.push_back(frame.clone());
        }
    }

    /// Frames still queued.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// How many times the console asked to end the session.
    pub fn end_requests(&self) -> usize {
        self.end_requests
    }
}

impl XrHost for QueuedXrHost {
    fn poll_frame(&mut self, _dt: f32) -> XrFrame {
        if let Some(frame) = self.queue.pop_front() {
            self.last = frame;
        }
        let mut frame = self.last.clone();
        if self.end_requests > 0 {
            frame.session_active = false;
        }
        frame
    }

    fn end_session(&mut self) {
        self.end_requests += 1;
    }

    fn is_finished(&self) -> bool {
        self.finish_when_empty && self.queue.is_empty()
    }
}

/// Fluent builder for [`XrFrame`] values.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    frame: XrFrame,
}

impl FrameBuilder {
    /// A frame outside any XR session.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A frame inside an active session with the head at `camera`.
    pub fn session(camera: Vec3) -> Self {
        Self {
            frame: XrFrame {
                session_active: true,
                camera_position: camera,
                ..Default::default()
            },
        }
    }

    /// Track a hand with its index fingertip at `pointer`.
    pub fn hand(mut self, side: Handedness, pointer: Vec3) -> Self {
        self.frame.hands[side.index()] = Some(HandPose {
            pointer,
            rotation: Quat::IDENTITY,
            pinching: false,
        });
        self
    }

    /// Track a pinching hand.
    pub fn pinching_hand(mut self, side: Handedness, pointer: Vec3) -> Self {
        self.frame.hands[side.index()] = Some(HandPose {
            pointer,
            rotation: Quat::IDENTITY,
            pinching: true,
        });
        self
    }

    /// Track a controller.
    pub fn controller(mut self, side: Handedness, position: Vec3, rotation: Quat, select: bool) -> Self {
        self.frame.controllers[side.index()] = Some(ControllerPose {
            position,
            rotation,
            select,
        });
        self
    }

    /// Finish the frame.
    pub fn build(self) -> XrFrame {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_last_frame_and_honours_end() {
        let mut host = QueuedXrHost::new();
        host.push(FrameBuilder::session(Vec3::Y).build());

        assert!(host.poll_frame(0.1).session_active);
        assert!(host.poll_frame(0.1).session_active);

        host.end_session();
        assert!(!host.poll_frame(0.1).session_active);
        assert_eq!(host.end_requests(), 1);
        assert!(!host.is_finished());
    }

    #[test]
    fn finishes_when_drained() {
        let mut host = QueuedXrHost::new().finish_when_empty();
        host.push_repeated(FrameBuilder::idle().build(), 2);
        assert_eq!(host.queued(), 2);
        host.poll_frame(0.1);
        host.poll_frame(0.1);
        assert!(host.is_finished());
    }

    #[test]
    fn builder_places_hands_by_side() {
        let frame = FrameBuilder::session(Vec3::ZERO)
            .hand(Handedness::Right, Vec3::X)
            .build();
        assert!(frame.hands[0].is_none());
        assert_eq!(frame.hands[1].map(|h| h.pointer), Some(Vec3::X));
    }
}
