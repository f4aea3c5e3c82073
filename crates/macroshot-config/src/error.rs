use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
  /// The document does not match the workflow schema.
  ///
  /// `path` locates the offending value, e.g. `$.workflow[2].elements[0].bounds`.
  #[error("malformed script at {path}: {message}")]
  MalformedScript { path: String, message: String },

  #[error("failed to access script file '{}': {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to serialize script: {0}")]
  Serialize(#[from] serde_json::Error),
}

impl ScriptError {
  pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
    Self::MalformedScript {
      path: path.into(),
      message: message.into(),
    }
  }

  /// The field path for malformed scripts.
  pub fn path(&self) -> Option<&str> {
    match self {
      Self::MalformedScript { path, .. } => Some(path),
      _ => None,
    }
  }
}
