// Core value types shared by the buffer, the brush and the window.

use serde::{Deserialize, Serialize};

/// Linear per-channel color, every channel in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self {
            r: px[0] as f32 / 255.0,
            g: px[1] as f32 / 255.0,
            b: px[2] as f32 / 255.0,
            a: px[3] as f32 / 255.0,
        }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Pack as 0x00RRGGBB for minifb. Alpha is dropped; the paper is opaque.
    pub fn to_u32(self) -> u32 {
        let [r, g, b, _] = self.to_rgba8();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Straight per-channel interpolation, alpha included. `t` is clamped to [0,1].
    #[inline]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[inline]
fn to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// 8-bit RGBA as it appears in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color8(pub [u8; 4]);

impl From<Color8> for Rgba {
    fn from(c: Color8) -> Self {
        Rgba::from_rgba8(c.0)
    }
}

/// What the window shows: one 0x00RRGGBB word per pixel.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}
