#![warn(missing_docs)]
//! Model and texture loading for the organ scene.
//!
//! Decoding runs on background threads through [`AssetLoader`]; results are
//! collected with [`AssetLoader::poll`] on a later frame.

mod loader;
mod model;
mod texture;

pub use loader::{AssetEvent, AssetKind, AssetLoader};
pub use model::{load_model, MeshInfo, ModelAsset};
pub use texture::{load_texture, TextureAsset};

use thiserror::Error;

/// Errors emitted while loading scene assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Wrap IO errors when reading files.
    #[error("failed to read asset: {0}")]
    Io(#[from] std::io::Error),
    /// Texture could not be decoded.
    #[error("failed to decode texture: {0}")]
    Image(#[from] image::ImageError),
    /// Model could not be imported.
    #[error("failed to import model: {0}")]
    Gltf(#[from] gltf::Error),
    /// Model imported but contains no mesh geometry.
    #[error("model contains no meshes")]
    NoGeometry,
}
