use anyhow::{Context, Result};
use organ_console_audio::AudioManager;
use organ_console_core::frame_dt;
use organ_console_input::{ScriptedXrHost, XrHost};
use organ_console_testkit::{EventRecord, JsonlSink, MetricsSink, RunReport, RunReportBuilder};
use organ_console_ui3d::ButtonEvent;
use std::path::PathBuf;
use tracing::info;

use crate::app::ConsoleApp;
use crate::config::ConsoleConfig;

/// Script used when none is given: a short session with no hands in view.
const IDLE_SCRIPT: &str = r#"{"steps": [{"duration": 1.0, "session_active": true, "camera": [0.0, 1.6, 0.0]}]}"#;

pub struct HeadlessConfig {
    pub console: ConsoleConfig,
    pub script: Option<PathBuf>,
    /// Frame cap; runs until the script finishes when None.
    pub max_frames: Option<u64>,
    pub fps: u32,
    pub event_log: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub no_audio: bool,
}

pub fn run(cfg: HeadlessConfig) -> Result<RunReport> {
    let host = match &cfg.script {
        Some(path) => ScriptedXrHost::from_path(path)
            .with_context(|| format!("Failed to load xr script {}", path.display()))?,
        None => ScriptedXrHost::from_json(IDLE_SCRIPT)?,
    };
    let audio = if cfg.no_audio {
        AudioManager::stub()
    } else {
        AudioManager::new()?
    };
    if !audio.is_available() {
        info!("no audio output; button sounds are silent");
    }

    let mut app = ConsoleApp::new(cfg.console, host, audio);
    let mut sink = cfg
        .event_log
        .as_ref()
        .map(JsonlSink::create)
        .transpose()
        .context("Failed to create event log")?;

    let report = drive(&mut app, cfg.fps, cfg.max_frames, sink.as_mut())?;

    if let Some(sink) = sink.as_mut() {
        sink.flush()?;
    }
    if let Some(path) = &cfg.report {
        MetricsSink::create(path)?.write(&report)?;
    }
    Ok(report)
}

/// Run frames until the host finishes or `max_frames` is reached.
pub fn drive<H: XrHost>(
    app: &mut ConsoleApp<H>,
    fps: u32,
    max_frames: Option<u64>,
    mut sink: Option<&mut JsonlSink>,
) -> Result<RunReport> {
    let dt = frame_dt(fps);
    let mut builder = RunReportBuilder::new("headless");
    let mut frames = 0u64;

    while max_frames.map_or(true, |max| frames < max) && !app.is_finished() {
        for record in app.frame(dt) {
            let kind = match record.event {
                ButtonEvent::Press => {
                    builder = builder.press(&record.button);
                    "button_press"
                }
                ButtonEvent::Release => {
                    builder = builder.release(&record.button);
                    "button_release"
                }
            };
            if let Some(sink) = sink.as_deref_mut() {
                sink.write(&EventRecord {
                    tick: record.tick,
                    kind,
                    payload: &record.button,
                })?;
            }
        }
        frames += 1;
    }

    info!(frames, "headless run finished");
    Ok(builder
        .frames(frames, frames as f32 * dt)
        .session_ended(app.session_end_requested())
        .build())
}
