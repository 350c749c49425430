// Round brush stamps and how they are dabbed into the paper.
// Visual: a filled disc of brush color, solid in the middle and slightly
// lighter toward its rim, so overlapping dabs build up into a darker line.

use std::collections::HashMap;

use crate::pixel_buffer::PixelBuffer;
use crate::types::Rgba;

/// Opacity at the center of a stamp.
pub const CENTER_ALPHA: f32 = 1.0;
/// Opacity on the boundary circle.
pub const EDGE_ALPHA: f32 = 0.7;

/// One covered pixel of a stamp, relative to its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPixel {
    pub dx: i32,
    pub dy: i32,
    pub alpha: f32,
}

/// Precomputed disc for one radius. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub radius: u32,
    pub pixels: Vec<StampPixel>, // every (dx,dy) with dx²+dy² <= radius²
}

/// Build the disc for `radius`. Radius 0 is a single full-alpha pixel.
pub fn compute_stamp(radius: u32) -> Stamp {
    let r = radius as i32;
    let r2 = r * r;
    let mut pixels = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);

    for dy in -r..=r {
        for dx in -r..=r {
            let d2 = dx * dx + dy * dy;
            if d2 > r2 {
                continue;
            }
            let alpha = if r2 == 0 {
                CENTER_ALPHA
            } else {
                let t = d2 as f32 / r2 as f32;
                CENTER_ALPHA + (EDGE_ALPHA - CENTER_ALPHA) * t
            };
            pixels.push(StampPixel { dx, dy, alpha });
        }
    }

    Stamp { radius, pixels }
}

/// Memoizes stamps by radius; small radii recur on every frame of a stroke.
#[derive(Debug, Default)]
pub struct StampCache {
    stamps: HashMap<u32, Stamp>,
}

impl StampCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, radius: u32) -> &Stamp {
        self.stamps.entry(radius).or_insert_with(|| compute_stamp(radius))
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}

/// Dab `stamp` centered at (cx, cy). Pixels past the paper edge are skipped.
/// Each covered pixel moves toward `color` by the stamp alpha (plain lerp, not "over").
pub fn apply_stamp(buffer: &mut PixelBuffer, cx: i32, cy: i32, stamp: &Stamp, color: Rgba) {
    for p in &stamp.pixels {
        let x = cx as i64 + p.dx as i64;
        let y = cy as i64 + p.dy as i64;
        if !buffer.contains(x, y) {
            continue;
        }
        let px = buffer.pixel_mut(x as usize, y as usize);
        *px = px.lerp(color, p.alpha);
    }
}
