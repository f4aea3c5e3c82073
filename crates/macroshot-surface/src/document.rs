use chrono::{DateTime, Local};
use macroshot_config::Rect;

use crate::overlay::Overlay;
use crate::pixels::Pixels;

/// A captured image plus the overlays placed on it.
///
/// Overlays are kept as objects until the document is flattened by a
/// renderer, so their order is their paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDocument {
  pixels: Pixels,
  overlays: Vec<Overlay>,
  captured_at: DateTime<Local>,
  title: Option<String>,
}

impl ImageDocument {
  pub fn new(pixels: Pixels, captured_at: DateTime<Local>) -> Self {
    Self {
      pixels,
      overlays: Vec::new(),
      captured_at,
      title: None,
    }
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn pixels(&self) -> &Pixels {
    &self.pixels
  }

  pub fn width(&self) -> u32 {
    self.pixels.width()
  }

  pub fn height(&self) -> u32 {
    self.pixels.height()
  }

  pub fn overlays(&self) -> &[Overlay] {
    &self.overlays
  }

  pub fn captured_at(&self) -> DateTime<Local> {
    self.captured_at
  }

  pub fn title(&self) -> Option<&str> {
    self.title.as_deref()
  }

  pub fn add_overlay(&mut self, overlay: impl Into<Overlay>) {
    self.overlays.push(overlay.into());
  }

  /// Replace the pixels with the part inside `area`.
  ///
  /// Returns false and leaves the document untouched when the area does
  /// not overlap the image.
  pub fn crop(&mut self, area: &Rect) -> bool {
    match self.pixels.crop(area) {
      Some(cropped) => {
        self.pixels = cropped;
        true
      }
      None => false,
    }
  }
}
