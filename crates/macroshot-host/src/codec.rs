use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use macroshot_surface::Pixels;
use tracing::debug;

use crate::error::HostError;

/// Reads and writes image files.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ImageCodec: Send + Sync {
  fn load(&self, path: &Path) -> Result<Pixels, HostError>;

  /// Encode with the format implied by the file extension.
  fn save(&self, pixels: &Pixels, path: &Path) -> Result<(), HostError>;
}

/// Codec backed by the `image` crate.
///
/// Files are read fully into memory before decoding, so no handle stays
/// open on the source file. Paths without a known extension are written
/// as PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileCodec;

impl ImageCodec for ImageFileCodec {
  fn load(&self, path: &Path) -> Result<Pixels, HostError> {
    let bytes = std::fs::read(path).map_err(|e| HostError::io(path, e))?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| HostError::decode(path, e.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(path = %path.display(), width, height, "image_decoded");
    Pixels::from_rgba(width, height, rgba.into_raw())
      .ok_or_else(|| HostError::decode(path, "decoded buffer has an unexpected size"))
  }

  fn save(&self, pixels: &Pixels, path: &Path) -> Result<(), HostError> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    let buffer = RgbaImage::from_raw(pixels.width(), pixels.height(), pixels.as_rgba().to_vec())
      .ok_or_else(|| HostError::encode(path, "pixel buffer does not match its dimensions"))?;

    // JPEG has no alpha channel.
    let image = match format {
      ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(buffer).to_rgb8()),
      _ => DynamicImage::ImageRgba8(buffer),
    };

    image
      .save_with_format(path, format)
      .map_err(|e| HostError::encode(path, e.to_string()))?;
    debug!(path = %path.display(), format = ?format, "image_encoded");
    Ok(())
  }
}
