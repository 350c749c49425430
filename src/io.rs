// PNG in (reference signatures) and PNG out (saving what the player drew).

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::types::Rgba;

pub fn from_rgba_image(img: &RgbaImage) -> Result<PixelBuffer> {
    let (w, h) = img.dimensions();
    let pixels = img.pixels().map(|p| Rgba::from_rgba8(p.0)).collect();
    PixelBuffer::from_pixels(w as usize, h as usize, pixels)
}

pub fn to_rgba_image(buffer: &PixelBuffer) -> RgbaImage {
    let (w, h) = buffer.dimensions();
    let mut img = RgbaImage::new(w as u32, h as u32);
    for (dst, src) in img.pixels_mut().zip(buffer.pixels()) {
        dst.0 = src.to_rgba8();
    }
    img
}

/// Decode any supported image file into a buffer.
pub fn load_png(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|source| Error::Image { path: path.to_path_buf(), source })?
        .to_rgba8();
    let buffer = from_rgba_image(&img)?;
    log::info!("loaded {} ({}x{})", path.display(), buffer.width(), buffer.height());
    Ok(buffer)
}

/// Lossless export of the buffer.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    to_rgba_image(buffer)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Image { path: path.to_path_buf(), source })?;
    log::info!("saved drawing to {}", path.display());
    Ok(())
}
