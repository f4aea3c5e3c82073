use macroshot_surface::{Pixels, Rect};

use crate::error::HostError;

/// Acquires pixels from the screen.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait ScreenSource: Send + Sync {
  /// Capture every attached display as one image.
  fn capture_fullscreen(&self, show_cursor: bool) -> Result<Pixels, HostError>;

  /// Capture a rectangle in screen coordinates.
  fn capture_region(&self, area: Rect, show_cursor: bool) -> Result<Pixels, HostError>;
}

/// A screen source for environments without a display.
///
/// Every capture fails, so scripts that only process files still run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessScreen;

impl ScreenSource for HeadlessScreen {
  fn capture_fullscreen(&self, _show_cursor: bool) -> Result<Pixels, HostError> {
    Err(HostError::unavailable("screen capture", "no display is attached"))
  }

  fn capture_region(&self, _area: Rect, _show_cursor: bool) -> Result<Pixels, HostError> {
    Err(HostError::unavailable("screen capture", "no display is attached"))
  }
}
