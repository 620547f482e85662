use organ_console::config::ConsoleConfig;
use organ_console::headless::{self, HeadlessConfig};
use organ_console_testkit::read_jsonl;
use std::path::PathBuf;

#[test]
fn scripted_session_presses_reset_then_exits() {
    let out = std::env::temp_dir().join(format!("organ-console-headless-{}", std::process::id()));
    let event_log = out.join("events.jsonl");
    let report_path = out.join("report.json");

    let mut console = ConsoleConfig::default();
    console.assets.model = None;
    console.assets.texture = None;

    let report = headless::run(HeadlessConfig {
        console,
        script: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scripts/press_reset_then_exit.json")),
        max_frames: Some(72 * 10),
        fps: 72,
        event_log: Some(event_log.clone()),
        report: Some(report_path.clone()),
        no_audio: true,
    })
    .expect("headless run succeeds");

    assert!(report.session_ended);
    assert_eq!(report.buttons["reset"].presses, 1);
    assert_eq!(report.buttons["reset"].releases, 1);
    assert_eq!(report.buttons["exit"].presses, 1);
    assert!(report.frames < 72 * 10, "script should finish before the frame cap");

    let events = read_jsonl(&event_log).expect("event log readable");
    let kinds: Vec<(&str, &str)> = events
        .iter()
        .map(|e| (e["kind"].as_str().unwrap_or(""), e["payload"].as_str().unwrap_or("")))
        .collect();
    assert_eq!(kinds[0], ("button_press", "reset"));
    assert_eq!(kinds[1], ("button_release", "reset"));
    assert_eq!(kinds[2], ("button_press", "exit"));
    assert!(report_path.exists());
    let _ = std::fs::remove_dir_all(out);
}
