use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::{load_model, load_texture, AssetError, ModelAsset, TextureAsset};

/// What a load request was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// glTF / GLB model
    Model,
    /// Image texture
    Texture,
}

/// Completion of a background load.
#[derive(Debug)]
pub enum AssetEvent {
    /// Model decoded.
    ModelLoaded {
        /// Requested path.
        path: PathBuf,
        /// Decoded model.
        model: ModelAsset,
    },
    /// Texture decoded.
    TextureLoaded {
        /// Requested path.
        path: PathBuf,
        /// Decoded texture.
        texture: TextureAsset,
    },
    /// Load failed; not retried.
    Failed {
        /// Requested path.
        path: PathBuf,
        /// Request kind.
        kind: AssetKind,
        /// Cause.
        error: AssetError,
    },
}

/// Runs decodes on background threads and hands results back through a channel.
pub struct AssetLoader {
    tx: Sender<AssetEvent>,
    rx: Receiver<AssetEvent>,
    in_flight: usize,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLoader {
    /// Create an idle loader.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, in_flight: 0 }
    }

    /// Start decoding a model.
    pub fn request_model(&mut self, path: impl AsRef<Path>) {
        self.spawn(path.as_ref().to_path_buf(), AssetKind::Model);
    }

    /// Start decoding a texture.
    pub fn request_texture(&mut self, path: impl AsRef<Path>) {
        self.spawn(path.as_ref().to_path_buf(), AssetKind::Texture);
    }

    fn spawn(&mut self, path: PathBuf, kind: AssetKind) {
        tracing::debug!(path = %path.display(), ?kind, "asset load requested");
        let tx = self.tx.clone();
        self.in_flight += 1;
        thread::spawn(move || {
            let event = match kind {
                AssetKind::Model => match load_model(&path) {
                    Ok(model) => AssetEvent::ModelLoaded { path, model },
                    Err(error) => AssetEvent::Failed { path, kind, error },
                },
                AssetKind::Texture => match load_texture(&path) {
                    Ok(texture) => AssetEvent::TextureLoaded { path, texture },
                    Err(error) => AssetEvent::Failed { path, kind, error },
                },
            };
            let _ = tx.send(event);
        });
    }

    /// Number of requests that have not been collected yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Collect every load that finished since the last poll.
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let events: Vec<AssetEvent> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(events.len());
        events
    }
}
