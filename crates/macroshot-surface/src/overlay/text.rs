use std::sync::LazyLock;

use macroshot_config::{Point, Rect};

use super::{HasLine, LineStyle, set_fill_color, set_line_color, set_line_thickness, set_shadow};
use crate::field::{Field, FieldError, FieldValue};
use crate::geometry::Size;
use crate::registry::{CapabilityRegistry, Styleable, positive};

/// Space between the text and the box outline, per side.
pub const TEXT_PADDING: i32 = 2;

/// Font parameters the renderer needs to measure and draw text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
  pub size: f32,
  pub bold: bool,
  pub italic: bool,
}

impl Default for FontSpec {
  fn default() -> Self {
    Self {
      size: 11.0,
      bold: false,
      italic: false,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
  pub bounds: Rect,
  pub content: String,
  pub line: LineStyle,
  pub font: FontSpec,
}

impl Default for TextOverlay {
  fn default() -> Self {
    Self {
      bounds: Rect::new(0, 0, 0, 0),
      content: String::new(),
      line: LineStyle::default(),
      font: FontSpec::default(),
    }
  }
}

impl TextOverlay {
  pub fn new(position: Point, content: impl Into<String>) -> Self {
    Self {
      bounds: Rect::new(position.x, position.y, 0, 0),
      content: content.into(),
      ..Self::default()
    }
  }

  /// Resize the box to hold text of the measured size, keeping the top-left corner.
  pub fn fit_to(&mut self, measured: Size) {
    let inset = self.line.thickness.saturating_add(TEXT_PADDING).saturating_mul(2);
    let grow = |extent: u32| i32::try_from(extent).unwrap_or(i32::MAX).saturating_add(inset);
    self.bounds.width = grow(measured.width);
    self.bounds.height = grow(measured.height);
  }
}

impl HasLine for TextOverlay {
  fn line_mut(&mut self) -> &mut LineStyle {
    &mut self.line
  }
}

fn set_font_size(text: &mut TextOverlay, value: FieldValue) -> Result<(), FieldError> {
  text.font.size = positive(Field::FontSize, value)?;
  Ok(())
}

fn set_font_bold(text: &mut TextOverlay, value: FieldValue) -> Result<(), FieldError> {
  text.font.bold = value.as_bool(Field::FontBold)?;
  Ok(())
}

fn set_font_italic(text: &mut TextOverlay, value: FieldValue) -> Result<(), FieldError> {
  text.font.italic = value.as_bool(Field::FontItalic)?;
  Ok(())
}

static CAPABILITIES: LazyLock<CapabilityRegistry<TextOverlay>> = LazyLock::new(|| {
  CapabilityRegistry::<TextOverlay>::new()
    .with(Field::LineThickness, set_line_thickness)
    .with(Field::LineColor, set_line_color)
    .with(Field::FillColor, set_fill_color)
    .with(Field::Shadow, set_shadow)
    .with(Field::FontSize, set_font_size)
    .with(Field::FontBold, set_font_bold)
    .with(Field::FontItalic, set_font_italic)
});

impl Styleable for TextOverlay {
  fn capabilities() -> &'static CapabilityRegistry<Self> {
    &CAPABILITIES
  }
}
