//! Run summaries exported as JSON for CI artifacts.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Press/release counts for one button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonCounts {
    /// Transitions into fully pressed.
    pub presses: u32,
    /// Transitions into recovering.
    pub releases: u32,
}

/// Summary of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier
    pub run_name: String,
    /// When the report was built (ISO 8601)
    pub timestamp: String,
    /// Frames driven
    pub frames: u64,
    /// Simulated seconds
    pub simulated_seconds: f32,
    /// Per-button counts keyed by button name
    pub buttons: BTreeMap<String, ButtonCounts>,
    /// Whether the console asked the host to end the session
    pub session_ended: bool,
}

/// Builder for [`RunReport`].
pub struct RunReportBuilder {
    report: RunReport,
}

impl RunReportBuilder {
    /// Start a report for `run_name`.
    pub fn new(run_name: impl Into<String>) -> Self {
        Self {
            report: RunReport {
                run_name: run_name.into(),
                timestamp: chrono::Utc::now().to_rfc3339(),
                frames: 0,
                simulated_seconds: 0.0,
                buttons: BTreeMap::new(),
                session_ended: false,
            },
        }
    }

    /// Set frame count and simulated time.
    pub fn frames(mut self, frames: u64, simulated_seconds: f32) -> Self {
        self.report.frames = frames;
        self.report.simulated_seconds = simulated_seconds;
        self
    }

    /// Count a press of `button`.
    pub fn press(mut self, button: &str) -> Self {
        self.report.buttons.entry(button.to_owned()).or_default().presses += 1;
        self
    }

    /// Count a release of `button`.
    pub fn release(mut self, button: &str) -> Self {
        self.report.buttons.entry(button.to_owned()).or_default().releases += 1;
        self
    }

    /// Record whether the session was ended.
    pub fn session_ended(mut self, ended: bool) -> Self {
        self.report.session_ended = ended;
        self
    }

    /// Build the report.
    pub fn build(self) -> RunReport {
        self.report
    }
}

/// Sink for writing run reports to JSON files.
pub struct MetricsSink {
    path: std::path::PathBuf,
}

impl MetricsSink {
    /// Create a new sink at the specified path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Write the report as pretty JSON.
    pub fn write(&self, report: &RunReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
