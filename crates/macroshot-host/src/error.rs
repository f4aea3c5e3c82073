use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by collaborator implementations.
#[derive(Debug, Error)]
pub enum HostError {
  /// The collaborator cannot work in this environment (no display, no clipboard).
  #[error("{what} is unavailable: {message}")]
  Unavailable { what: &'static str, message: String },

  #[error("screen capture failed: {message}")]
  Capture { message: String },

  #[error("failed to decode image '{}': {message}", .path.display())]
  Decode { path: PathBuf, message: String },

  #[error("failed to encode image '{}': {message}", .path.display())]
  Encode { path: PathBuf, message: String },

  #[error("clipboard error: {message}")]
  Clipboard { message: String },

  #[error("failed to access '{}'", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl HostError {
  pub fn unavailable(what: &'static str, message: impl Into<String>) -> Self {
    Self::Unavailable {
      what,
      message: message.into(),
    }
  }

  pub fn capture(message: impl Into<String>) -> Self {
    Self::Capture {
      message: message.into(),
    }
  }

  pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self::Decode {
      path: path.into(),
      message: message.into(),
    }
  }

  pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
    Self::Encode {
      path: path.into(),
      message: message.into(),
    }
  }

  pub fn clipboard(message: impl Into<String>) -> Self {
    Self::Clipboard {
      message: message.into(),
    }
  }

  pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
