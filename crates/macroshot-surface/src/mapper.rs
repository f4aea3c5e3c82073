//! Applies declarative style sets to overlays.
//!
//! # Flow
//! 1. Normalize each key and resolve it against the [`Field`] catalogue
//! 2. Ask the target whether it exposes the field in its current state
//! 3. Coerce the raw value to the field's kind
//! 4. Run the field's setter from the target's capability registry
//!
//! None of the problems found along the way are fatal. Each one becomes a
//! [`StyleIssue`] in the returned report and the remaining keys still apply.

use macroshot_config::StyleSet;
use thiserror::Error;
use tracing::debug;

use crate::coerce::{CoerceFailure, coerce_value};
use crate::color::Color;
use crate::field::{Field, FieldError, FieldValue, normalize_key};
use crate::overlay::{ObfuscateOverlay, ObfuscatePreset};
use crate::registry::Styleable;

/// A non-fatal problem met while applying a style.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleIssue {
  #[error("unknown style key '{key}'")]
  UnknownStyleKey { key: String },

  #[error("style key '{key}' maps to {field}, which this element does not support")]
  UnsupportedField { key: String, field: Field },

  #[error("style key '{key}' has unrecognized color {value}, using red")]
  ColorFallback { key: String, value: String },

  #[error("style key '{key}' could not be coerced: {message}")]
  CoercionFailed {
    key: String,
    field: Field,
    message: String,
  },

  #[error("style key '{key}' was rejected: {error}")]
  ApplyFailed {
    key: String,
    field: Field,
    error: FieldError,
  },

  #[error("unknown obfuscation method '{method}'")]
  UnknownMethod { method: String },
}

impl StyleIssue {
  /// The style key the issue is about, when there is one.
  pub fn key(&self) -> Option<&str> {
    match self {
      Self::UnknownStyleKey { key }
      | Self::UnsupportedField { key, .. }
      | Self::ColorFallback { key, .. }
      | Self::CoercionFailed { key, .. }
      | Self::ApplyFailed { key, .. } => Some(key),
      Self::UnknownMethod { .. } => None,
    }
  }
}

/// Outcome of one [`apply_style`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleReport {
  /// Fields that were written, in style order.
  pub applied: Vec<Field>,
  pub issues: Vec<StyleIssue>,
}

impl StyleReport {
  pub fn is_clean(&self) -> bool {
    self.issues.is_empty()
  }

  fn merge(&mut self, other: StyleReport) {
    self.applied.extend(other.applied);
    self.issues.extend(other.issues);
  }
}

pub fn apply_style<T: Styleable>(target: &mut T, style: &StyleSet) -> StyleReport {
  let mut report = StyleReport::default();

  for (key, raw) in style.iter() {
    let Some(field) = Field::resolve(key) else {
      report.issues.push(StyleIssue::UnknownStyleKey { key: key.to_string() });
      continue;
    };

    if !target.exposes(field) {
      report.issues.push(StyleIssue::UnsupportedField {
        key: key.to_string(),
        field,
      });
      continue;
    }

    let value = match coerce_value(field, raw) {
      Ok(value) => value,
      Err(CoerceFailure::Color) => {
        report.issues.push(StyleIssue::ColorFallback {
          key: key.to_string(),
          value: raw.to_string(),
        });
        FieldValue::Color(Color::RED)
      }
      Err(CoerceFailure::Other(message)) => {
        report.issues.push(StyleIssue::CoercionFailed {
          key: key.to_string(),
          field,
          message,
        });
        continue;
      }
    };

    match target.apply_field(field, value) {
      Ok(()) => {
        debug!(field = field.name(), value = %value, "style_field_applied");
        report.applied.push(field);
      }
      Err(error) => report.issues.push(StyleIssue::ApplyFailed {
        key: key.to_string(),
        field,
        error,
      }),
    }
  }

  report
}

/// Pick the obfuscation preset for a style.
///
/// A key naming the blur radius selects blur, else a key naming the pixel
/// size selects pixelation, else `method` decides. With none of these the
/// overlay keeps its current preset.
pub fn select_obfuscate_preset(
  overlay: &mut ObfuscateOverlay,
  style: Option<&StyleSet>,
  method: Option<&str>,
) -> Option<StyleIssue> {
  let names_field = |field: Field| {
    let wanted = normalize_key(field.name());
    style.is_some_and(|s| s.keys().any(|key| normalize_key(key) == wanted))
  };

  if names_field(Field::BlurRadius) {
    overlay.preset = ObfuscatePreset::Blur;
  } else if names_field(Field::PixelSize) {
    overlay.preset = ObfuscatePreset::Pixelate;
  } else if let Some(method) = method {
    match ObfuscatePreset::from_method(method) {
      Some(preset) => overlay.preset = preset,
      None => {
        return Some(StyleIssue::UnknownMethod {
          method: method.to_string(),
        });
      }
    }
  }
  None
}

/// Style an obfuscation: choose its preset, then apply the style.
pub fn apply_obfuscate_style(
  overlay: &mut ObfuscateOverlay,
  style: Option<&StyleSet>,
  method: Option<&str>,
) -> StyleReport {
  let mut report = StyleReport::default();
  if let Some(issue) = select_obfuscate_preset(overlay, style, method) {
    report.issues.push(issue);
  }
  if let Some(style) = style {
    report.merge(apply_style(overlay, style));
  }
  report
}
