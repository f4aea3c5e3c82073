//! Runtime errors.

use std::path::PathBuf;

use macroshot_config::{Rect, ScriptError};
use macroshot_host::HostError;

/// Errors that abort a run at the step that raised them.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
  /// A field the step needs in its current mode is absent.
  #[error("step {step_index} is missing required field '{field}'")]
  MissingField { step_index: usize, field: &'static str },

  #[error("file not found: {}", .path.display())]
  FileNotFound { path: PathBuf },

  #[error("capture failed: {message}")]
  CaptureFailed { message: String },

  /// `annotate` or `export` ran before any successful capture.
  #[error("{step} requires a captured image, but none is active")]
  NoActiveDocument { step: &'static str },

  #[error("invalid capture area {}x{} at ({}, {})", .area.width, .area.height, .area.x, .area.y)]
  InvalidArea { area: Rect },

  #[error("unsupported capture type '{mode}'")]
  UnsupportedCaptureMode { mode: String },

  #[error(transparent)]
  Host(#[from] HostError),

  #[error("failed to create directory '{}'", .path.display())]
  CreateDirectory {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl RuntimeError {
  pub(crate) fn capture_failed(message: impl Into<String>) -> Self {
    Self::CaptureFailed {
      message: message.into(),
    }
  }
}

/// Errors that prevent a run from starting.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  #[error(transparent)]
  Script(#[from] ScriptError),
}
