use std::borrow::Cow;

use arboard::{Clipboard, ImageData};
use macroshot_surface::Pixels;

use crate::error::HostError;

/// Places images on the system clipboard.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ClipboardSink: Send + Sync {
  fn set_image(&self, pixels: &Pixels) -> Result<(), HostError>;
}

/// The platform clipboard, via `arboard`.
///
/// A clipboard handle is opened per call and dropped afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
  fn set_image(&self, pixels: &Pixels) -> Result<(), HostError> {
    let mut clipboard = Clipboard::new().map_err(|e| HostError::unavailable("clipboard", e.to_string()))?;
    let image = ImageData {
      width: pixels.width() as usize,
      height: pixels.height() as usize,
      bytes: Cow::Borrowed(pixels.as_rgba()),
    };
    clipboard
      .set_image(image)
      .map_err(|e| HostError::clipboard(e.to_string()))
  }
}
