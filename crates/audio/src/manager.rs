//! Audio manager for sound loading and playback.

use crate::{AudioSettings, SoundId};
use anyhow::{Context, Result};
use glam::Vec3;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, warn};

#[cfg(feature = "rodio_backend")]
mod backend {
    use super::*;
    use rodio::{OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    /// Audio data for a loaded sound.
    pub struct SoundData {
        /// Raw encoded audio bytes
        pub data: Vec<u8>,
    }

    /// Check that the bytes decode before handing them to the main thread.
    pub fn validate(data: &[u8]) -> Result<()> {
        rodio::Decoder::new(Cursor::new(data.to_vec())).context("Failed to decode audio")?;
        Ok(())
    }

    /// Backend state for rodio audio.
    pub struct BackendState {
        /// Output stream (must be kept alive)
        pub _stream: OutputStream,
        /// Stream handle for creating sinks
        pub stream_handle: OutputStreamHandle,
        /// Active one-shot sound effects
        pub active_sounds: Arc<Mutex<Vec<Sink>>>,
    }

    impl BackendState {
        pub fn new() -> Result<Self> {
            let (stream, stream_handle) =
                OutputStream::try_default().context("Failed to create audio output stream")?;

            Ok(Self {
                _stream: stream,
                stream_handle,
                active_sounds: Arc::new(Mutex::new(Vec::new())),
            })
        }

        pub fn play_sound(&self, data: &SoundData, volume: f32) -> Result<()> {
            let cursor = Cursor::new(data.data.clone());
            let source = rodio::Decoder::new(cursor).context("Failed to decode audio")?;

            let sink = Sink::try_new(&self.stream_handle).context("Failed to create audio sink")?;
            sink.set_volume(volume);
            sink.append(source);

            if let Ok(mut active) = self.active_sounds.lock() {
                active.retain(|s| !s.empty());
                active.push(sink);
            }

            Ok(())
        }

        pub fn update(&mut self) {
            if let Ok(mut active) = self.active_sounds.lock() {
                active.retain(|s| !s.empty());
            }
        }
    }
}

#[cfg(not(feature = "rodio_backend"))]
mod backend {
    use super::*;

    /// Audio data for a loaded sound (stub).
    #[allow(dead_code)]
    pub struct SoundData {
        /// Raw audio bytes (unused in stub mode)
        pub data: Vec<u8>,
    }

    pub fn validate(_data: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Backend state stub when rodio is not available.
    pub struct BackendState;

    impl BackendState {
        pub fn new() -> Result<Self> {
            debug!("Audio backend: stub (no rodio)");
            Ok(Self)
        }

        pub fn play_sound(&self, _data: &SoundData, _volume: f32) -> Result<()> {
            Ok(())
        }

        pub fn update(&mut self) {}
    }
}

use backend::{BackendState, SoundData};
use std::sync::Arc;

type LoadResult = (SoundId, PathBuf, Result<Vec<u8>>);

/// Main audio manager for the console.
///
/// Sounds are loaded off-thread with [`AudioManager::load_sound_async`] and
/// installed by [`AudioManager::update`]. Uses rodio for output when the
/// `rodio_backend` feature is enabled.
pub struct AudioManager {
    /// Backend state
    backend: Option<BackendState>,
    /// Current audio settings
    settings: AudioSettings,
    /// Loaded sound effects cache
    sounds: HashMap<SoundId, Arc<SoundData>>,
    /// Sounds requested but not yet delivered
    pending: HashSet<SoundId>,
    load_tx: Sender<LoadResult>,
    load_rx: Receiver<LoadResult>,
    /// Listener position for 3D audio
    listener_pos: Vec3,
}

impl AudioManager {
    /// Create a new audio manager.
    ///
    /// Falls back to a stub if audio initialization fails.
    pub fn new() -> Result<Self> {
        let backend = match BackendState::new() {
            Ok(b) => {
                debug!("Audio manager initialized");
                Some(b)
            }
            Err(e) => {
                warn!("Failed to initialize audio: {}. Using stub.", e);
                None
            }
        };

        let mut manager = Self::stub();
        manager.backend = backend;
        Ok(manager)
    }

    /// Create a stub audio manager that doesn't actually play audio.
    ///
    /// Loading still runs, so tests can observe binding.
    pub fn stub() -> Self {
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            backend: None,
            settings: AudioSettings::default(),
            sounds: HashMap::new(),
            pending: HashSet::new(),
            load_tx,
            load_rx,
            listener_pos: Vec3::ZERO,
        }
    }

    /// Check if audio playback is available.
    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Replace the volume settings; out-of-range volumes are clamped.
    pub fn set_settings(&mut self, settings: &AudioSettings) {
        self.settings = settings.clamped();
    }

    /// Effective volume a sound plays at.
    pub fn volume(&self, id: SoundId) -> f32 {
        id.default_volume() * self.settings.effective_sfx_volume()
    }

    /// Move the listener (attached to the XR camera).
    pub fn set_listener_position(&mut self, pos: Vec3) {
        self.listener_pos = pos;
    }

    /// Current listener position.
    pub fn listener_position(&self) -> Vec3 {
        self.listener_pos
    }

    /// Load a sound effect from bytes already in memory.
    pub fn load_sound(&mut self, id: SoundId, data: Vec<u8>) {
        self.pending.remove(&id);
        self.sounds.insert(id, Arc::new(SoundData { data }));
        debug!("Loaded sound: {:?}", id);
    }

    /// Read and validate a sound file on a background thread.
    ///
    /// The sound becomes playable on the first [`AudioManager::update`] after
    /// the thread finishes. Requests for a sound that is already loaded or
    /// pending are ignored.
    pub fn load_sound_async(&mut self, id: SoundId, path: impl AsRef<Path>) {
        if self.sounds.contains_key(&id) || !self.pending.insert(id) {
            return;
        }
        let path = path.as_ref().to_path_buf();
        let tx = self.load_tx.clone();
        thread::spawn(move || {
            let result = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))
                .and_then(|bytes| backend::validate(&bytes).map(|_| bytes));
            let _ = tx.send((id, path, result));
        });
    }

    /// Whether `id` has finished loading.
    pub fn is_loaded(&self, id: SoundId) -> bool {
        self.sounds.contains_key(&id)
    }

    /// Number of loads still in flight.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Play a sound effect. A sound that has not finished loading is skipped.
    pub fn play_sfx(&self, id: SoundId) {
        let Some(sound_data) = self.sounds.get(&id) else {
            debug!("Sound not loaded: {:?}", id);
            return;
        };
        let volume = self.volume(id);
        if volume <= 0.0 {
            return;
        }
        if let Some(backend) = &self.backend {
            if let Err(e) = backend.play_sound(sound_data.as_ref(), volume) {
                warn!("Failed to play sound {:?}: {}", id, e);
            }
        }
    }

    /// Update audio state (call once per frame).
    ///
    /// Installs finished background loads and cleans up finished sounds.
    pub fn update(&mut self) {
        while let Ok((id, path, result)) = self.load_rx.try_recv() {
            match result {
                Ok(data) => self.load_sound(id, data),
                Err(e) => {
                    self.pending.remove(&id);
                    warn!("Failed to load sound {:?} from {}: {:#}", id, path.display(), e);
                }
            }
        }
        if let Some(backend) = &mut self.backend {
            backend.update();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::stub()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_loads(manager: &mut AudioManager) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while manager.pending_loads() > 0 && Instant::now() < deadline {
            manager.update();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_stub_manager() {
        let manager = AudioManager::stub();
        assert!(!manager.is_available());
        assert_eq!(manager.volume(SoundId::ButtonRelease), 1.0);
    }

    #[test]
    fn test_settings_are_clamped() {
        let mut manager = AudioManager::stub();
        manager.set_settings(&AudioSettings {
            master: 5.0,
            sfx: 0.5,
            muted: false,
        });
        assert_eq!(manager.volume(SoundId::ButtonPress), 0.5);
    }

    #[test]
    fn test_listener_position() {
        let mut manager = AudioManager::stub();
        manager.set_listener_position(Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(manager.listener_position(), Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_play_unloaded_is_noop() {
        let manager = AudioManager::stub();
        manager.play_sfx(SoundId::ButtonRelease);
        assert!(!manager.is_loaded(SoundId::ButtonRelease));
    }

    #[cfg(not(feature = "rodio_backend"))]
    #[test]
    fn test_async_load_installs_sound() {
        let path = std::env::temp_dir().join(format!(
            "organ-console-audio-{}-press.ogg",
            std::process::id()
        ));
        std::fs::write(&path, b"not really ogg").expect("write temp sound");

        let mut manager = AudioManager::stub();
        manager.load_sound_async(SoundId::ButtonPress, &path);
        manager.load_sound_async(SoundId::ButtonPress, &path);
        assert_eq!(manager.pending_loads(), 1);

        wait_for_loads(&mut manager);
        assert!(manager.is_loaded(SoundId::ButtonPress));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_stays_unbound() {
        let mut manager = AudioManager::stub();
        manager.load_sound_async(SoundId::ButtonRelease, "definitely/not/here.ogg");
        wait_for_loads(&mut manager);
        assert!(!manager.is_loaded(SoundId::ButtonRelease));
        assert_eq!(manager.pending_loads(), 0);
    }
}
