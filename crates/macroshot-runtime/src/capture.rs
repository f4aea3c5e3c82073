//! The capture stage: produce a fresh image document.

use std::path::Path;
use std::time::Duration;

use macroshot_config::{CaptureMode, CaptureStep};
use macroshot_host::Host;
use macroshot_surface::{ImageDocument, Pixels};
use tracing::{debug, info, instrument};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

/// Run a capture step.
///
/// The returned document replaces whatever document the run held before.
#[instrument(name = "capture", skip(host, config, step), fields(mode = ?step.mode))]
pub fn capture(
  host: &Host,
  config: &RuntimeConfig,
  step_index: usize,
  step: &CaptureStep,
) -> Result<ImageDocument, RuntimeError> {
  let options = step.options.unwrap_or_default();

  let pixels = match &step.mode {
    CaptureMode::File => return capture_file(host, step_index, step),
    CaptureMode::Other(mode) => {
      return Err(RuntimeError::UnsupportedCaptureMode { mode: mode.clone() });
    }
    CaptureMode::Fullscreen => {
      wait(options.delay_ms);
      host.screen.capture_fullscreen(options.show_cursor)
    }
    CaptureMode::Region => {
      let area = step.area.ok_or(RuntimeError::MissingField {
        step_index,
        field: "area",
      })?;
      if area.width < 0 || area.height < 0 {
        return Err(RuntimeError::InvalidArea { area });
      }
      if area.is_empty() {
        return Err(RuntimeError::capture_failed("capture area is empty"));
      }
      wait(options.delay_ms);
      host.screen.capture_region(area, options.show_cursor)
    }
  }
  .map_err(|e| RuntimeError::capture_failed(e.to_string()))?;

  let pixels = non_empty(pixels)?;
  let mut document = ImageDocument::new(pixels, host.clock.now());

  let auto_crop = step.autocrop.unwrap_or(config.auto_crop);
  if auto_crop {
    let threshold = step.autocrop_difference.unwrap_or(config.auto_crop_difference);
    let rect = host.crop.find_crop_rect(document.pixels(), threshold);
    if !rect.is_empty() && document.crop(&rect) {
      info!(
        step_index,
        x = rect.x,
        y = rect.y,
        width = document.width(),
        height = document.height(),
        "capture_cropped"
      );
    }
  }

  Ok(document)
}

/// Load an image file. No delay and no auto-crop.
fn capture_file(host: &Host, step_index: usize, step: &CaptureStep) -> Result<ImageDocument, RuntimeError> {
  let path = step.path.as_deref().ok_or(RuntimeError::MissingField {
    step_index,
    field: "path",
  })?;
  let path = Path::new(path);
  if !path.exists() {
    return Err(RuntimeError::FileNotFound {
      path: path.to_path_buf(),
    });
  }

  let pixels = non_empty(host.codec.load(path)?)?;
  let mut document = ImageDocument::new(pixels, host.clock.now());
  if let Some(name) = path.file_name() {
    document = document.with_title(name.to_string_lossy());
  }
  debug!(step_index, path = %path.display(), "capture_file_loaded");
  Ok(document)
}

fn non_empty(pixels: Pixels) -> Result<Pixels, RuntimeError> {
  if pixels.is_empty() {
    return Err(RuntimeError::capture_failed("captured image has no pixels"));
  }
  Ok(pixels)
}

fn wait(delay_ms: u64) {
  if delay_ms > 0 {
    debug!(delay_ms, "capture_delay");
    std::thread::sleep(Duration::from_millis(delay_ms));
  }
}
