use std::sync::LazyLock;

use macroshot_config::Rect;

use super::{HasLine, LineStyle, set_fill_color, set_line_color, set_line_thickness, set_shadow};
use crate::field::Field;
use crate::registry::{CapabilityRegistry, Styleable};

#[derive(Debug, Clone, PartialEq)]
pub struct RectangleOverlay {
  pub bounds: Rect,
  pub line: LineStyle,
}

impl Default for RectangleOverlay {
  fn default() -> Self {
    Self {
      bounds: Rect::new(0, 0, 0, 0),
      line: LineStyle::default(),
    }
  }
}

impl HasLine for RectangleOverlay {
  fn line_mut(&mut self) -> &mut LineStyle {
    &mut self.line
  }
}

static CAPABILITIES: LazyLock<CapabilityRegistry<RectangleOverlay>> = LazyLock::new(|| {
  CapabilityRegistry::<RectangleOverlay>::new()
    .with(Field::LineThickness, set_line_thickness)
    .with(Field::LineColor, set_line_color)
    .with(Field::FillColor, set_fill_color)
    .with(Field::Shadow, set_shadow)
});

impl Styleable for RectangleOverlay {
  fn capabilities() -> &'static CapabilityRegistry<Self> {
    &CAPABILITIES
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::color::Color;
  use crate::field::FieldValue;

  #[test]
  fn test_defaults() {
    let rect = RectangleOverlay::default();
    assert_eq!(rect.line.thickness, 2);
    assert_eq!(rect.line.color, Color::RED);
    assert!(rect.line.fill.is_transparent());
    assert!(rect.line.shadow);
  }

  #[test]
  fn test_capabilities() {
    let mut rect = RectangleOverlay::default();
    assert!(rect.exposes(Field::FillColor));
    assert!(!rect.exposes(Field::FontSize));

    rect
      .apply_field(Field::LineColor, FieldValue::Color(Color::rgb(0, 255, 0)))
      .unwrap();
    assert_eq!(rect.line.color, Color::rgb(0, 255, 0));
  }
}
