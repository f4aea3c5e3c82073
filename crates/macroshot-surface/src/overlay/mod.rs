//! Annotation overlays placed on an image document.

mod arrow;
mod obfuscate;
mod rectangle;
mod text;

pub use arrow::ArrowOverlay;
pub use obfuscate::{ObfuscateOverlay, ObfuscatePreset};
pub use rectangle::RectangleOverlay;
pub use text::{FontSpec, TEXT_PADDING, TextOverlay};

use macroshot_config::Rect;

use crate::color::Color;
use crate::field::{Field, FieldError, FieldValue};
use crate::registry::non_negative;

/// Outline and fill shared by the drawable shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
  pub thickness: i32,
  pub color: Color,
  pub fill: Color,
  pub shadow: bool,
}

impl Default for LineStyle {
  fn default() -> Self {
    Self {
      thickness: 2,
      color: Color::RED,
      fill: Color::TRANSPARENT,
      shadow: true,
    }
  }
}

/// Overlays whose outline lives in a [`LineStyle`].
pub(crate) trait HasLine {
  fn line_mut(&mut self) -> &mut LineStyle;
}

pub(crate) fn set_line_thickness<T: HasLine>(target: &mut T, value: FieldValue) -> Result<(), FieldError> {
  target.line_mut().thickness = non_negative(Field::LineThickness, value)?;
  Ok(())
}

pub(crate) fn set_line_color<T: HasLine>(target: &mut T, value: FieldValue) -> Result<(), FieldError> {
  target.line_mut().color = value.as_color(Field::LineColor)?;
  Ok(())
}

pub(crate) fn set_fill_color<T: HasLine>(target: &mut T, value: FieldValue) -> Result<(), FieldError> {
  target.line_mut().fill = value.as_color(Field::FillColor)?;
  Ok(())
}

pub(crate) fn set_shadow<T: HasLine>(target: &mut T, value: FieldValue) -> Result<(), FieldError> {
  target.line_mut().shadow = value.as_bool(Field::Shadow)?;
  Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
  Rectangle(RectangleOverlay),
  Arrow(ArrowOverlay),
  Text(TextOverlay),
  Obfuscate(ObfuscateOverlay),
}

impl Overlay {
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Rectangle(_) => "rectangle",
      Self::Arrow(_) => "arrow",
      Self::Text(_) => "text",
      Self::Obfuscate(_) => "obfuscate",
    }
  }

  /// The area the overlay covers.
  pub fn bounds(&self) -> Rect {
    match self {
      Self::Rectangle(o) => o.bounds,
      Self::Arrow(o) => o.bounds(),
      Self::Text(o) => o.bounds,
      Self::Obfuscate(o) => o.bounds,
    }
  }
}

impl From<RectangleOverlay> for Overlay {
  fn from(o: RectangleOverlay) -> Self {
    Self::Rectangle(o)
  }
}

impl From<ArrowOverlay> for Overlay {
  fn from(o: ArrowOverlay) -> Self {
    Self::Arrow(o)
  }
}

impl From<TextOverlay> for Overlay {
  fn from(o: TextOverlay) -> Self {
    Self::Text(o)
  }
}

impl From<ObfuscateOverlay> for Overlay {
  fn from(o: ObfuscateOverlay) -> Self {
    Self::Obfuscate(o)
  }
}
