use std::path::Path;

use crate::AssetError;

/// A decoded texture; only its dimensions are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureAsset {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decode a PNG/JPEG/TGA file.
pub fn load_texture(path: &Path) -> Result<TextureAsset, AssetError> {
    let image = image::open(path)?;
    Ok(TextureAsset {
        width: image.width(),
        height: image.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_dimensions() {
        let path = std::env::temp_dir().join(format!(
            "organ-console-assets-{}-skin.png",
            std::process::id()
        ));
        image::RgbaImage::new(4, 2).save(&path).expect("save png");

        let texture = load_texture(&path).expect("texture loads");
        assert_eq!(texture, TextureAsset { width: 4, height: 2 });
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_texture_fails() {
        assert!(load_texture(Path::new("model/material/missing.tga")).is_err());
    }
}
