//! organ-console - VR organ viewer console
//!
//! Headless executable: replays a scripted XR session against the console.

use anyhow::Result;
use clap::Parser;
use organ_console::config::ConsoleConfig;
use organ_console::headless::{self, HeadlessConfig};
use organ_console_core::DEFAULT_FPS;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "organ-console", version, about = "VR organ viewer console (headless runner)")]
struct Cli {
    /// Console configuration (TOML).
    #[arg(long, default_value = organ_console::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// JSON xr script to replay.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Simulated frame rate.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Write button events as JSONL.
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Write a JSON run summary.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Do not open an audio device.
    #[arg(long)]
    no_audio: bool,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting organ-console v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let console = ConsoleConfig::load_from_path(&cli.config);

    let report = headless::run(HeadlessConfig {
        console,
        script: cli.script,
        max_frames: cli.frames,
        fps: cli.fps,
        event_log: cli.event_log,
        report: cli.report,
        no_audio: cli.no_audio,
    })?;

    info!(
        frames = report.frames,
        session_ended = report.session_ended,
        "run complete"
    );
    Ok(())
}
