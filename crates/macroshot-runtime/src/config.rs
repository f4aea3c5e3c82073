//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Process-wide defaults that individual steps may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
  /// Auto-crop screen captures unless the step says otherwise.
  pub auto_crop: bool,
  /// Color difference below which a pixel counts as background when cropping.
  pub auto_crop_difference: i32,
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    Self {
      auto_crop: false,
      auto_crop_difference: 10,
    }
  }
}
