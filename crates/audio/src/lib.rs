//! Audio for the organ console.
//!
//! Two shared sounds (button press and release) are loaded lazily on a
//! background thread the first time an XR session appears. Playing a sound
//! that has not finished loading is a silent no-op.
//!
//! # Architecture
//!
//! - [`AudioManager`] - Loading, playback and listener tracking
//! - [`SoundId`] - Identifier for sound effects
//! - [`AudioSettings`] - Master and SFX volume
//!
//! # Example
//!
//! ```ignore
//! let mut audio = AudioManager::new()?;
//! audio.load_sound_async(SoundId::ButtonPress, "sounds/button-press.ogg");
//! audio.update();
//! audio.play_sfx(SoundId::ButtonPress);
//! ```

mod manager;
mod settings;
mod sounds;

pub use manager::AudioManager;
pub use settings::AudioSettings;
pub use sounds::SoundId;
