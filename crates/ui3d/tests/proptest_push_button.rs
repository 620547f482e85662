//! Property-based tests for the push-button state machine
//!
//! Validates button invariants:
//! - Position never leaves [floor, resting]
//! - Exactly one event per edge into fully_pressed / recovering
//! - Recovery is linear and stops exactly at the resting height

use organ_console_ui3d::{ButtonConfig, ButtonEvent, ButtonState, PushButton};
use proptest::prelude::*;

const RESTING_Y: f32 = 0.04;

fn frame_input() -> impl Strategy<Value = Vec<f32>> {
    prop_oneof![
        2 => Just(Vec::new()),
        3 => prop::collection::vec(-0.02f32..0.06, 1..=2),
    ]
}

proptest! {
    /// Property: position stays within travel for any input sequence
    #[test]
    fn position_stays_within_travel(
        frames in prop::collection::vec(frame_input(), 1..200),
        dt in 0.005f32..0.05,
        full_press in 0.005f32..0.04,
    ) {
        let config = ButtonConfig { full_press_distance: full_press, ..Default::default() };
        let mut button = PushButton::new(config).with_resting_y(RESTING_Y);
        let floor = RESTING_Y - full_press;
        let mut y = RESTING_Y;

        for depths in &frames {
            let step = button.step(y, depths, dt);
            y = step.y;
            prop_assert!(y >= floor - 1e-6, "y {} below floor {}", y, floor);
            prop_assert!(y <= RESTING_Y + 1e-6, "y {} above resting {}", y, RESTING_Y);
        }
    }

    /// Property: events fire exactly on state edges
    ///
    /// Counting transitions in the observed state sequence must match the
    /// number of emitted events of each kind.
    #[test]
    fn events_match_state_edges(
        frames in prop::collection::vec(frame_input(), 1..200),
        dt in 0.005f32..0.05,
    ) {
        let mut button = PushButton::new(ButtonConfig::default()).with_resting_y(RESTING_Y);
        let mut y = RESTING_Y;
        let mut prev = ButtonState::Resting;
        let (mut presses, mut releases) = (0usize, 0usize);
        let (mut press_edges, mut release_edges) = (0usize, 0usize);

        for depths in &frames {
            let step = button.step(y, depths, dt);
            y = step.y;

            match step.event {
                Some(ButtonEvent::Press) => presses += 1,
                Some(ButtonEvent::Release) => releases += 1,
                None => {}
            }
            if step.state == ButtonState::FullyPressed && prev != ButtonState::FullyPressed {
                press_edges += 1;
            }
            if step.state == ButtonState::Recovering && prev != ButtonState::Recovering {
                release_edges += 1;
            }
            prev = step.state;
        }

        prop_assert_eq!(presses, press_edges);
        prop_assert_eq!(releases, release_edges);
    }

    /// Property: released buttons climb by recovery_speed * dt and stop at rest
    #[test]
    fn recovery_is_linear_and_exact(
        start_offset in 0.001f32..0.02,
        dt in 0.005f32..0.05,
    ) {
        let config = ButtonConfig::default();
        let mut button = PushButton::new(config).with_resting_y(RESTING_Y);
        let mut y = RESTING_Y - start_offset;

        for _ in 0..1000 {
            let step = button.step(y, &[], dt);
            if step.state == ButtonState::Resting {
                prop_assert_eq!(step.y, RESTING_Y);
                return Ok(());
            }
            let expected = (y + config.recovery_speed * dt).min(RESTING_Y);
            prop_assert!((step.y - expected).abs() < 1e-6);
            prop_assert!(step.y > y);
            y = step.y;
        }
        prop_assert!(false, "button never came to rest");
    }
}
