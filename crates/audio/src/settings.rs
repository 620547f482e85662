//! Audio settings and volume controls.

use serde::{Deserialize, Serialize};

/// Audio volume settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 to 1.0)
    pub master: f32,
    /// Sound effects volume (0.0 to 1.0)
    pub sfx: f32,
    /// Whether audio is muted
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            sfx: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Create new audio settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the effective SFX volume (master * sfx).
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master * self.sfx
        }
    }

    /// Copy with both volumes forced into 0.0-1.0 (NaN counts as 1.0).
    pub fn clamped(&self) -> Self {
        let clamp = |v: f32| if v.is_nan() { 1.0 } else { v.clamp(0.0, 1.0) };
        Self {
            master: clamp(self.master),
            sfx: clamp(self.sfx),
            muted: self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AudioSettings::default();
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.sfx, 1.0);
        assert!(!settings.muted);
    }

    #[test]
    fn test_effective_volume() {
        let settings = AudioSettings {
            master: 0.5,
            sfx: 0.6,
            ..Default::default()
        };
        assert!((settings.effective_sfx_volume() - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_mute() {
        let settings = AudioSettings {
            muted: true,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamping() {
        let settings = AudioSettings {
            master: 1.5,
            sfx: -0.5,
            muted: false,
        }
        .clamped();
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.sfx, 0.0);

        let settings = AudioSettings {
            master: f32::NAN,
            ..Default::default()
        }
        .clamped();
        assert_eq!(settings.master, 1.0);
    }
}
