//! Macroshot Host
//!
//! Interfaces to everything a macro run needs from the outside world, and
//! reference implementations for the ones that can be written portably.
//!
//! | trait | default |
//! |---|---|
//! | [`ScreenSource`] | [`HeadlessScreen`] (always fails) |
//! | [`CropDetector`] | [`ThresholdCropDetector`] |
//! | [`Renderer`] | [`RasterRenderer`] |
//! | [`ImageCodec`] | [`ImageFileCodec`] |
//! | [`ClipboardSink`] | [`SystemClipboard`] |
//! | [`Clock`] | [`SystemClock`] |
//!
//! Enable the `testing` feature to get `mockall` mocks (`MockScreenSource`,
//! `MockImageCodec`, ...) for every trait.

mod clipboard;
mod clock;
mod codec;
mod crop;
mod error;
mod render;
mod screen;

use std::sync::Arc;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::{ImageCodec, ImageFileCodec};
pub use crop::{CropDetector, ThresholdCropDetector};
pub use error::HostError;
pub use render::{RasterRenderer, Renderer};
pub use screen::{HeadlessScreen, ScreenSource};

#[cfg(any(test, feature = "testing"))]
pub use clipboard::MockClipboardSink;
#[cfg(any(test, feature = "testing"))]
pub use clock::MockClock;
#[cfg(any(test, feature = "testing"))]
pub use codec::MockImageCodec;
#[cfg(any(test, feature = "testing"))]
pub use crop::MockCropDetector;
#[cfg(any(test, feature = "testing"))]
pub use render::MockRenderer;
#[cfg(any(test, feature = "testing"))]
pub use screen::MockScreenSource;

/// The collaborators a run executes against.
#[derive(Clone)]
pub struct Host {
  pub screen: Arc<dyn ScreenSource>,
  pub crop: Arc<dyn CropDetector>,
  pub renderer: Arc<dyn Renderer>,
  pub codec: Arc<dyn ImageCodec>,
  pub clipboard: Arc<dyn ClipboardSink>,
  pub clock: Arc<dyn Clock>,
}

impl Default for Host {
  fn default() -> Self {
    Self {
      screen: Arc::new(HeadlessScreen),
      crop: Arc::new(ThresholdCropDetector),
      renderer: Arc::new(RasterRenderer),
      codec: Arc::new(ImageFileCodec),
      clipboard: Arc::new(SystemClipboard),
      clock: Arc::new(SystemClock),
    }
  }
}

impl Host {
  pub fn with_screen(mut self, screen: impl ScreenSource + 'static) -> Self {
    self.screen = Arc::new(screen);
    self
  }

  pub fn with_crop(mut self, crop: impl CropDetector + 'static) -> Self {
    self.crop = Arc::new(crop);
    self
  }

  pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
    self.renderer = Arc::new(renderer);
    self
  }

  pub fn with_codec(mut self, codec: impl ImageCodec + 'static) -> Self {
    self.codec = Arc::new(codec);
    self
  }

  pub fn with_clipboard(mut self, clipboard: impl ClipboardSink + 'static) -> Self {
    self.clipboard = Arc::new(clipboard);
    self
  }

  pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
    self.clock = Arc::new(clock);
    self
  }
}
