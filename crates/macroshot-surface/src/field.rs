//! The global catalogue of annotation fields.
//!
//! Style keys from a script are resolved against this catalogue before an
//! overlay is asked whether it exposes the field. Resolution works on the
//! normalized key, so `line_color`, `lineColor` and `LINE-COLOR` all land
//! on [`Field::LineColor`].

use std::fmt;

use thiserror::Error;

use crate::color::Color;

/// The value type a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Color,
  Integer,
  Boolean,
  Float,
}

impl fmt::Display for FieldKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Color => "color",
      Self::Integer => "integer",
      Self::Boolean => "boolean",
      Self::Float => "float",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
  LineColor,
  FillColor,
  HighlightColor,
  LineThickness,
  BlurRadius,
  PixelSize,
  MagnificationFactor,
  Shadow,
  FontBold,
  FontItalic,
  FontSize,
  PreviewQuality,
}

impl Field {
  pub const ALL: [Field; 12] = [
    Field::LineColor,
    Field::FillColor,
    Field::HighlightColor,
    Field::LineThickness,
    Field::BlurRadius,
    Field::PixelSize,
    Field::MagnificationFactor,
    Field::Shadow,
    Field::FontBold,
    Field::FontItalic,
    Field::FontSize,
    Field::PreviewQuality,
  ];

  /// Canonical catalogue name, e.g. `LINE_COLOR`.
  pub fn name(&self) -> &'static str {
    match self {
      Self::LineColor => "LINE_COLOR",
      Self::FillColor => "FILL_COLOR",
      Self::HighlightColor => "HIGHLIGHT_COLOR",
      Self::LineThickness => "LINE_THICKNESS",
      Self::BlurRadius => "BLUR_RADIUS",
      Self::PixelSize => "PIXEL_SIZE",
      Self::MagnificationFactor => "MAGNIFICATION_FACTOR",
      Self::Shadow => "SHADOW",
      Self::FontBold => "FONT_BOLD",
      Self::FontItalic => "FONT_ITALIC",
      Self::FontSize => "FONT_SIZE",
      Self::PreviewQuality => "PREVIEW_QUALITY",
    }
  }

  pub fn kind(&self) -> FieldKind {
    match self {
      Self::LineColor | Self::FillColor | Self::HighlightColor => FieldKind::Color,
      Self::LineThickness | Self::BlurRadius | Self::PixelSize | Self::MagnificationFactor => {
        FieldKind::Integer
      }
      Self::Shadow | Self::FontBold | Self::FontItalic => FieldKind::Boolean,
      Self::FontSize | Self::PreviewQuality => FieldKind::Float,
    }
  }

  /// Resolve a style key against the catalogue.
  pub fn resolve(key: &str) -> Option<Field> {
    let key = normalize_key(key);
    Field::ALL
      .into_iter()
      .find(|field| normalize_key(field.name()) == key)
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Uppercase and drop separators (`_`, `-`, `.`, whitespace).
pub fn normalize_key(key: &str) -> String {
  key
    .chars()
    .filter(|c| !matches!(c, '_' | '-' | '.') && !c.is_whitespace())
    .flat_map(char::to_uppercase)
    .collect()
}

/// A value already coerced to a field's kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
  Color(Color),
  Integer(i32),
  Boolean(bool),
  Float(f32),
}

impl FieldValue {
  pub fn kind(&self) -> FieldKind {
    match self {
      Self::Color(_) => FieldKind::Color,
      Self::Integer(_) => FieldKind::Integer,
      Self::Boolean(_) => FieldKind::Boolean,
      Self::Float(_) => FieldKind::Float,
    }
  }
}

impl fmt::Display for FieldValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Color(c) => write!(f, "{}", c),
      Self::Integer(i) => write!(f, "{}", i),
      Self::Boolean(b) => write!(f, "{}", b),
      Self::Float(x) => write!(f, "{}", x),
    }
  }
}

/// Errors raised by field setters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
  #[error("{field} does not accept {value}")]
  OutOfRange { field: Field, value: String },

  #[error("{field} expects a value of kind {expected}")]
  TypeMismatch { field: Field, expected: FieldKind },
}

impl FieldError {
  pub fn out_of_range(field: Field, value: impl fmt::Display) -> Self {
    Self::OutOfRange {
      field,
      value: value.to_string(),
    }
  }

  pub fn type_mismatch(field: Field) -> Self {
    Self::TypeMismatch {
      field,
      expected: field.kind(),
    }
  }
}

impl FieldValue {
  pub fn as_color(self, field: Field) -> Result<Color, FieldError> {
    match self {
      Self::Color(c) => Ok(c),
      _ => Err(FieldError::type_mismatch(field)),
    }
  }

  pub fn as_integer(self, field: Field) -> Result<i32, FieldError> {
    match self {
      Self::Integer(i) => Ok(i),
      _ => Err(FieldError::type_mismatch(field)),
    }
  }

  pub fn as_bool(self, field: Field) -> Result<bool, FieldError> {
    match self {
      Self::Boolean(b) => Ok(b),
      _ => Err(FieldError::type_mismatch(field)),
    }
  }

  pub fn as_float(self, field: Field) -> Result<f32, FieldError> {
    match self {
      Self::Float(x) => Ok(x),
      _ => Err(FieldError::type_mismatch(field)),
    }
  }
}
