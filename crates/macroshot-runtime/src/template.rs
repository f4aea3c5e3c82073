//! Output path templating.

use std::path::PathBuf;

use chrono::{DateTime, Local};

pub const TIMESTAMP_PLACEHOLDER: &str = "{timestamp}";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Substitute every `{timestamp}` in `template` with `now` as `yyyyMMdd_HHmmss`.
pub fn expand_path(template: &str, now: DateTime<Local>) -> PathBuf {
  if !template.contains(TIMESTAMP_PLACEHOLDER) {
    return PathBuf::from(template);
  }
  let stamp = now.format(TIMESTAMP_FORMAT).to_string();
  PathBuf::from(template.replace(TIMESTAMP_PLACEHOLDER, &stamp))
}
