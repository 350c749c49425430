// The paper: an in-memory RGBA grid that every brush stamp writes into.
// Visual: nothing changes on screen until `flush` pushes the grid to a surface,
// which the session does at most once per frame.

use crate::error::{Error, Result};
use crate::types::{FrameBuffer, Rgba};

/// Anything the paper can be pushed to (the window canvas, a texture, a counting test double).
pub trait Surface {
    /// Replace the surface contents with `buffer`.
    fn upload(&mut self, buffer: &PixelBuffer) -> Result<()>;
}

/// Row-major RGBA pixels with fixed dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// A `width`×`height` sheet filled with `color`.
    pub fn new(width: usize, height: usize, color: Rgba) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(format!(
                "buffer dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height, pixels: vec![color; width * height] })
    }

    /// Wrap existing row-major pixels. `pixels.len()` must equal `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(Error::InvalidConfig(format!(
                "{} pixels do not form a {width}x{height} buffer",
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i64, y: i64) -> Result<usize> {
        if !self.contains(x, y) {
            return Err(Error::OutOfRange { x, y, width: self.width, height: self.height });
        }
        Ok(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Result<Rgba> {
        let idx = self.index(x, y)?;
        Ok(self.pixels[idx])
    }

    pub fn set(&mut self, x: i64, y: i64, color: Rgba) -> Result<()> {
        let idx = self.index(x, y)?;
        self.pixels[idx] = color;
        Ok(())
    }

    /// Mutable access for callers that already checked `contains`.
    #[inline]
    pub(crate) fn pixel_mut(&mut self, x: usize, y: usize) -> &mut Rgba {
        debug_assert!(x < self.width && y < self.height);
        &mut self.pixels[y * self.width + x]
    }

    /// Visual: the whole sheet becomes `color` (blank paper on clear).
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Push the current contents to `surface`. Cost is W×H, so call once per frame.
    pub fn flush(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.upload(self)
    }
}

impl Surface for FrameBuffer {
    fn upload(&mut self, buffer: &PixelBuffer) -> Result<()> {
        if self.width != buffer.width || self.height != buffer.height {
            return Err(Error::WindowUpdate(format!(
                "canvas is {}x{} but paper is {}x{}",
                self.width, self.height, buffer.width, buffer.height
            )));
        }
        for (dst, src) in self.pixels.iter_mut().zip(&buffer.pixels) {
            *dst = src.to_u32();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_round_trip_in_range() {
        let mut buf = PixelBuffer::new(4, 3, Rgba::WHITE).unwrap();
        buf.set(3, 2, Rgba::BLACK).unwrap();
        assert_eq!(buf.get(3, 2).unwrap(), Rgba::BLACK);
        assert_eq!(buf.get(0, 0).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn out_of_range_access_is_rejected() {
        let mut buf = PixelBuffer::new(4, 3, Rgba::WHITE).unwrap();
        assert!(matches!(buf.get(4, 0), Err(Error::OutOfRange { x: 4, y: 0, .. })));
        assert!(matches!(buf.get(0, -1), Err(Error::OutOfRange { .. })));
        assert!(buf.set(0, 3, Rgba::BLACK).is_err());
        assert!(buf.pixels().iter().all(|&p| p == Rgba::WHITE));
    }

    #[test]
    fn zero_sized_buffer_is_rejected() {
        assert!(PixelBuffer::new(0, 10, Rgba::WHITE).is_err());
        assert!(PixelBuffer::from_pixels(2, 2, vec![Rgba::WHITE; 3]).is_err());
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut buf = PixelBuffer::new(5, 5, Rgba::WHITE).unwrap();
        buf.set(1, 1, Rgba::BLACK).unwrap();
        buf.fill(Rgba::new(0.5, 0.5, 0.5, 1.0));
        assert!(buf.pixels().iter().all(|p| p.r == 0.5));
    }

    #[test]
    fn flush_writes_packed_pixels_to_framebuffer() {
        let mut buf = PixelBuffer::new(2, 2, Rgba::WHITE).unwrap();
        buf.set(1, 0, Rgba::BLACK).unwrap();
        let mut fb = FrameBuffer::new(2, 2);
        buf.flush(&mut fb).unwrap();
        assert_eq!(fb.pixels, vec![0x00FF_FFFF, 0, 0x00FF_FFFF, 0x00FF_FFFF]);
    }

    #[test]
    fn flush_to_wrong_size_canvas_fails() {
        let buf = PixelBuffer::new(2, 2, Rgba::WHITE).unwrap();
        let mut fb = FrameBuffer::new(3, 2);
        assert!(matches!(buf.flush(&mut fb), Err(Error::WindowUpdate(_))));
    }
}
