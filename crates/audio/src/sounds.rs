//! Sound effect definitions.

use serde::{Deserialize, Serialize};

/// Identifiers for sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundId {
    /// Button reached the bottom of its travel
    ButtonPress,
    /// Button started springing back
    ButtonRelease,
}

impl SoundId {
    /// All sounds the console binds.
    pub const ALL: [SoundId; 2] = [SoundId::ButtonPress, SoundId::ButtonRelease];

    /// Default file path relative to the asset root.
    pub fn file_path(&self) -> &'static str {
        match self {
            SoundId::ButtonPress => "sounds/button-press.ogg",
            SoundId::ButtonRelease => "sounds/button-release.ogg",
        }
    }

    /// Base volume before settings. Button sounds are not positional and
    /// play at full volume.
    pub fn default_volume(&self) -> f32 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_paths() {
        assert_eq!(SoundId::ButtonPress.file_path(), "sounds/button-press.ogg");
        assert_eq!(
            SoundId::ButtonRelease.file_path(),
            "sounds/button-release.ogg"
        );
    }

    #[test]
    fn test_sounds_play_at_full_volume() {
        for id in SoundId::ALL {
            assert_eq!(id.default_volume(), 1.0);
        }
    }
}
