//! Hex colours as used by scene configuration (`0xRRGGBB`).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A packed `0xRRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Pure white, the neutral material tint.
    pub const WHITE: Self = Self(0xffffff);

    /// Red channel (0-255).
    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    /// Green channel (0-255).
    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    /// Blue channel (0-255).
    pub fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Normalized linear-ish RGB in 0.0..=1.0.
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r() as f32, self.g() as f32, self.b() as f32) / 255.0
    }

    /// Build from a random 24-bit value (upper bits are discarded).
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & 0xffffff)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack() {
        let c = Rgb(0xe84a5f);
        assert_eq!((c.r(), c.g(), c.b()), (0xe8, 0x4a, 0x5f));
    }

    #[test]
    fn white_is_unit_vector() {
        assert_eq!(Rgb::WHITE.to_vec3(), Vec3::ONE);
    }

    #[test]
    fn from_bits_masks_alpha() {
        assert_eq!(Rgb::from_bits(0xff00ff00), Rgb(0x00ff00));
    }
}
