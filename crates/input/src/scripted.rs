use crate::{ControllerPose, HandPose, XrFrame, XrHost};
use glam::Vec3;
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

/// Failure to load an XR script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Reading the script file failed.
    #[error("failed to read xr script: {0}")]
    Io(#[from] std::io::Error),
    /// The script is not valid JSON for the expected schema.
    #[error("failed to parse xr script: {0}")]
    Parse(#[from] serde_json::Error),
    /// A script must contain at least one step.
    #[error("xr script contains no steps")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    session_active: bool,
    #[serde(default)]
    camera: Vec3,
    #[serde(default)]
    hands: [Option<HandPose>; 2],
    #[serde(default)]
    controllers: [Option<ControllerPose>; 2],
}

impl ScriptedStep {
    fn to_frame(&self, session_allowed: bool) -> XrFrame {
        XrFrame {
            session_active: self.session_active && session_allowed,
            camera_position: self.camera,
            hands: self.hands,
            controllers: self.controllers,
        }
    }
}

/// XR host that replays a JSON list of held poses, for headless runs.
///
/// Each step is held for its `duration` in seconds; the last step is held
/// forever and [`XrHost::is_finished`] turns true once it has elapsed.
pub struct ScriptedXrHost {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    finished: bool,
    session_ended: bool,
}

impl ScriptedXrHost {
    /// Load a script from disk.
    pub fn from_path(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a script from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, ScriptError> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            finished: false,
            session_ended: false,
        })
    }

    /// Index of the step currently being replayed.
    pub fn step_index(&self) -> usize {
        self.index
    }

    fn advance(&mut self, dt: f32) {
        self.time_in_step += dt;
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            if self.index + 1 < self.steps.len() {
                self.index += 1;
            } else {
                self.time_in_step = 0.0;
                self.finished = true;
                break;
            }
        }
    }
}

impl XrHost for ScriptedXrHost {
    fn poll_frame(&mut self, dt: f32) -> XrFrame {
        let frame = self.steps[self.index].to_frame(!self.session_ended);
        self.advance(dt);
        frame
    }

    fn end_session(&mut self) {
        if !self.session_ended {
            tracing::info!("xr session ended by request");
        }
        self.session_ended = true;
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
