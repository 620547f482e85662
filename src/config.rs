use anyhow::Result;
use glam::Vec3;
use organ_console_audio::{AudioSettings, SoundId};
use organ_console_core::Rgb;
use organ_console_ui3d::{ButtonConfig, TOUCH_RADIUS};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::components::ButtonAction;

pub const DEFAULT_CONFIG_PATH: &str = "config/console.toml";

/// Scene and interaction configuration, read from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub console: ConsolePlacement,
    /// Where the console lands relative to the head once calibrated.
    pub calibration_offset: Vec3,
    pub buttons: Vec<ButtonDef>,
    pub audio: AudioConfig,
    pub assets: AssetConfig,
    pub interaction: InteractionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsolePlacement {
    /// Position before calibration.
    pub position: Vec3,
    pub size: Vec3,
    pub color: Rgb,
}

/// One button on the console. Positions are relative to the console body.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonDef {
    pub name: String,
    pub color: Rgb,
    pub position: Vec3,
    pub size: Vec3,
    pub surface_y: f32,
    pub full_press_distance: f32,
    pub recovery_speed: f32,
    pub action: ButtonAction,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub press_sound: PathBuf,
    pub release_sound: PathBuf,
    pub settings: AudioSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// glTF/GLB model; None skips loading.
    pub model: Option<PathBuf>,
    /// PNG/JPEG/TGA texture; None skips loading.
    pub texture: Option<PathBuf>,
    pub model_position: Vec3,
    pub model_scale: f32,
    /// Starting tint of the model material.
    pub model_tint: Rgb,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Fingertip sphere radius for button touch tests.
    pub touch_radius: f32,
    /// Pointer line length when a ray hits nothing.
    pub pointer_length: f32,
    /// Seconds the exit banner stays up before the session ends.
    pub exit_delay_secs: f32,
    /// Enable pinch-to-spawn and two-hand scaling.
    pub pinch_spawn: bool,
    /// Edge length of pinch-spawned cubes.
    pub spawn_size: f32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            console: ConsolePlacement::default(),
            calibration_offset: Vec3::new(0.0, -0.6, -0.3),
            buttons: default_buttons(),
            audio: AudioConfig::default(),
            assets: AssetConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

impl Default for ConsolePlacement {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, -0.3),
            size: Vec3::new(0.5, 0.12, 0.15),
            color: Rgb(0x505050),
        }
    }
}

impl Default for ButtonDef {
    fn default() -> Self {
        let tuning = ButtonConfig::default();
        Self {
            name: "button".to_owned(),
            color: Rgb::WHITE,
            position: Vec3::new(0.0, 0.04, 0.0),
            size: Vec3::new(0.08, 0.1, 0.08),
            surface_y: tuning.surface_y,
            full_press_distance: tuning.full_press_distance,
            recovery_speed: tuning.recovery_speed,
            action: ButtonAction::None,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            press_sound: PathBuf::from(SoundId::ButtonPress.file_path()),
            release_sound: PathBuf::from(SoundId::ButtonRelease.file_path()),
            settings: AudioSettings::default(),
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model: Some(PathBuf::from("model/organ.glb")),
            texture: Some(PathBuf::from("model/material/polys.tga")),
            model_position: Vec3::new(0.0, 1.0, -1.5),
            model_scale: 0.002,
            model_tint: Rgb::WHITE,
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            touch_radius: TOUCH_RADIUS,
            pointer_length: organ_console_ui3d::DEFAULT_POINTER_LENGTH,
            exit_delay_secs: 2.0,
            pinch_spawn: false,
            spawn_size: 0.05,
        }
    }
}

fn default_buttons() -> Vec<ButtonDef> {
    let button = |name: &str, color: u32, x: f32, action: ButtonAction| ButtonDef {
        name: name.to_owned(),
        color: Rgb(color),
        position: Vec3::new(x, 0.04, 0.0),
        action,
        ..ButtonDef::default()
    };
    vec![
        button("orange", 0xffd3b5, -0.15, ButtonAction::None),
        button("pink", 0xe84a5f, -0.05, ButtonAction::None),
        button("reset", 0x355c7d, 0.05, ButtonAction::ResetModelColor),
        ButtonDef {
            full_press_distance: 0.03,
            recovery_speed: 0.2,
            ..button("exit", 0xff0000, 0.15, ButtonAction::ExitSession)
        },
    ]
}

impl ButtonDef {
    /// State machine tuning for this button.
    pub fn tuning(&self) -> ButtonConfig {
        ButtonConfig {
            surface_y: self.surface_y,
            full_press_distance: self.full_press_distance,
            recovery_speed: self.recovery_speed,
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConsoleConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ConsoleConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Console config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ConsoleConfig::default()
            }
        };
        config.sanitize();
        config
    }

    /// Replace invalid tuning with defaults, warning once per offending entry.
    pub fn sanitize(&mut self) {
        let defaults = ButtonConfig::default();
        for def in &mut self.buttons {
            if let Err(err) = def.tuning().validate() {
                warn!(button = %def.name, "Invalid button tuning: {err}. Using defaults");
                def.surface_y = defaults.surface_y;
                def.full_press_distance = defaults.full_press_distance;
                def.recovery_speed = defaults.recovery_speed;
            }
            if !def.size.is_finite() || def.size.min_element() <= 0.0 {
                warn!(button = %def.name, "Invalid button size {:?}. Using default", def.size);
                def.size = ButtonDef::default().size;
            }
        }

        let interaction = InteractionConfig::default();
        if !(self.interaction.touch_radius.is_finite() && self.interaction.touch_radius > 0.0) {
            warn!(
                "Invalid touch_radius {}. Using {}",
                self.interaction.touch_radius, interaction.touch_radius
            );
            self.interaction.touch_radius = interaction.touch_radius;
        }
        if !(self.interaction.exit_delay_secs.is_finite() && self.interaction.exit_delay_secs >= 0.0)
        {
            warn!(
                "Invalid exit_delay_secs {}. Using {}",
                self.interaction.exit_delay_secs, interaction.exit_delay_secs
            );
            self.interaction.exit_delay_secs = interaction.exit_delay_secs;
        }
        if !(self.interaction.pointer_length.is_finite() && self.interaction.pointer_length > 0.0) {
            warn!(
                "Invalid pointer_length {}. Using {}",
                self.interaction.pointer_length, interaction.pointer_length
            );
            self.interaction.pointer_length = interaction.pointer_length;
        }
        if !(self.interaction.spawn_size.is_finite() && self.interaction.spawn_size > 0.0) {
            warn!(
                "Invalid spawn_size {}. Using {}",
                self.interaction.spawn_size, interaction.spawn_size
            );
            self.interaction.spawn_size = interaction.spawn_size;
        }
        if !(self.assets.model_scale.is_finite() && self.assets.model_scale > 0.0) {
            warn!("Invalid model_scale {}. Using default", self.assets.model_scale);
            self.assets.model_scale = AssetConfig::default().model_scale;
        }

        let audio = AudioConfig::default();
        if self.audio.press_sound.as_os_str().is_empty() {
            warn!("Empty press_sound path. Using {}", audio.press_sound.display());
            self.audio.press_sound = audio.press_sound;
        }
        if self.audio.release_sound.as_os_str().is_empty() {
            warn!("Empty release_sound path. Using {}", audio.release_sound.display());
            self.audio.release_sound = audio.release_sound;
        }
        let clamped = self.audio.settings.clamped();
        if clamped.master != self.audio.settings.master || clamped.sfx != self.audio.settings.sfx {
            warn!(
                "Audio volumes out of range (master {}, sfx {}). Clamping to {} and {}",
                self.audio.settings.master, self.audio.settings.sfx, clamped.master, clamped.sfx
            );
            self.audio.settings = clamped;
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
