use glam::Vec3;
use organ_console::config::{AssetConfig, ConsoleConfig};
use organ_console::ConsoleApp;
use organ_console_audio::AudioManager;
use organ_console_core::Rgb;
use organ_console_input::Handedness;
use organ_console_testkit::{FrameBuilder, QueuedXrHost};
use organ_console_ui3d::{ButtonEvent, ButtonState};

const DT: f32 = 0.1;
const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);

fn config() -> ConsoleConfig {
    ConsoleConfig {
        assets: AssetConfig {
            model: None,
            texture: None,
            model_tint: Rgb(0x33aa33),
            ..AssetConfig::default()
        },
        ..ConsoleConfig::default()
    }
}

fn app() -> ConsoleApp<QueuedXrHost> {
    ConsoleApp::new(config(), QueuedXrHost::new(), AudioManager::stub())
}

/// Fingertip 4 cm below the top of a button at console-local `x`, once calibrated.
fn pressing(x: f32) -> Vec3 {
    Vec3::new(x, 1.05, -0.3)
}

fn run(app: &mut ConsoleApp<QueuedXrHost>, frame: organ_console_input::XrFrame) -> Vec<(String, ButtonEvent)> {
    app.host_mut().push(frame);
    app.frame(DT)
        .into_iter()
        .map(|record| (record.button, record.event))
        .collect()
}

#[test]
fn console_waits_for_session_before_calibrating() {
    let mut app = app();
    run(&mut app, FrameBuilder::idle().build());
    let console = app.handles().console;
    let node = app
        .world()
        .get::<organ_console_ecs::SceneNode>(console)
        .expect("console node");
    assert_eq!(node.translation, Vec3::new(0.0, 1.0, -0.3));

    run(&mut app, FrameBuilder::session(Vec3::new(1.0, 1.7, 2.0)).build());
    let node = app
        .world()
        .get::<organ_console_ecs::SceneNode>(console)
        .expect("console node");
    assert!((node.translation - Vec3::new(1.0, 1.1, 1.7)).length() < 1e-5);
}

#[test]
fn full_press_fires_once_and_release_follows() {
    let mut app = app();
    run(&mut app, FrameBuilder::session(HEAD).build());
    assert_eq!(app.button_state("reset"), Some(ButtonState::Resting));

    let held = FrameBuilder::session(HEAD)
        .hand(Handedness::Right, pressing(0.05))
        .build();
    let first = run(&mut app, held.clone());
    assert_eq!(first, vec![("reset".to_owned(), ButtonEvent::Press)]);
    assert_eq!(app.button_state("reset"), Some(ButtonState::FullyPressed));
    assert!((app.button_y("reset").unwrap_or_default() - 0.02).abs() < 1e-5);
    assert_eq!(app.model_tint(), Rgb::WHITE);

    for _ in 0..2 {
        assert!(run(&mut app, held.clone()).is_empty());
        assert_eq!(app.button_state("reset"), Some(ButtonState::FullyPressed));
    }

    let released = run(&mut app, FrameBuilder::session(HEAD).build());
    assert_eq!(released, vec![("reset".to_owned(), ButtonEvent::Release)]);
    assert_eq!(app.button_state("reset"), Some(ButtonState::Recovering));

    // The release frame already climbs back to rest; the next frame settles.
    run(&mut app, FrameBuilder::session(HEAD).build());
    run(&mut app, FrameBuilder::session(HEAD).build());
    assert_eq!(app.button_state("reset"), Some(ButtonState::Resting));
    assert!((app.button_y("reset").unwrap_or_default() - 0.04).abs() < 1e-6);

    // Neighbouring buttons never moved.
    assert_eq!(app.button_state("orange"), Some(ButtonState::Resting));
}

#[test]
fn two_hands_on_one_button_press_once() {
    let mut app = app();
    run(&mut app, FrameBuilder::session(HEAD).build());

    let both = FrameBuilder::session(HEAD)
        .hand(Handedness::Left, Vec3::new(-0.15, 1.08, -0.3))
        .hand(Handedness::Right, pressing(-0.15))
        .build();
    let events = run(&mut app, both);
    assert_eq!(events, vec![("orange".to_owned(), ButtonEvent::Press)]);
}

#[test]
fn exit_button_ends_session_after_delay() {
    let mut app = app();
    run(&mut app, FrameBuilder::session(HEAD).build());

    let events = run(
        &mut app,
        FrameBuilder::session(HEAD)
            .hand(Handedness::Left, pressing(0.15))
            .build(),
    );
    assert_eq!(events, vec![("exit".to_owned(), ButtonEvent::Press)]);
    assert!(app.exit_banner_visible());

    // Pressing again while the countdown runs does not restart it.
    for _ in 0..15 {
        run(&mut app, FrameBuilder::session(HEAD).build());
    }
    run(
        &mut app,
        FrameBuilder::session(HEAD)
            .hand(Handedness::Left, pressing(0.15))
            .build(),
    );
    assert!(app.exit_banner_visible());
    assert_eq!(app.host().end_requests(), 0);

    for _ in 0..6 {
        run(&mut app, FrameBuilder::session(HEAD).build());
    }
    assert!(!app.exit_banner_visible());
    assert!(app.session_end_requested());
    assert_eq!(app.host().end_requests(), 1);
}

#[test]
fn sounds_bind_once_on_first_session_frame() {
    let mut app = app();
    run(&mut app, FrameBuilder::idle().build());
    assert!(!app
        .world()
        .resource::<organ_console::resources::AudioRequests>()
        .bound);

    run(&mut app, FrameBuilder::session(HEAD).build());
    run(&mut app, FrameBuilder::session(HEAD).build());
    let requests = app
        .world()
        .resource::<organ_console::resources::AudioRequests>();
    assert!(requests.bound);
    assert!(!requests.bind_now);
    assert_eq!(app.audio().listener_position(), HEAD);
}
