use std::sync::LazyLock;

use macroshot_config::{Point, Rect};

use super::{HasLine, LineStyle, set_fill_color, set_line_color, set_line_thickness, set_shadow};
use crate::field::Field;
use crate::registry::{CapabilityRegistry, Styleable};

/// A line from `start` to `start + extent` with a head at the far end.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowOverlay {
  pub start: Point,
  /// Signed delta to the head.
  pub extent: Point,
  pub line: LineStyle,
}

impl Default for ArrowOverlay {
  fn default() -> Self {
    Self {
      start: Point { x: 0, y: 0 },
      extent: Point { x: 0, y: 0 },
      line: LineStyle::default(),
    }
  }
}

impl ArrowOverlay {
  /// Place an arrow between two points.
  ///
  /// The extent saturates at the `i32` range.
  pub fn between(from: Point, to: Point) -> Self {
    Self {
      start: from,
      extent: Point {
        x: to.x.saturating_sub(from.x),
        y: to.y.saturating_sub(from.y),
      },
      ..Self::default()
    }
  }

  pub fn end(&self) -> Point {
    Point {
      x: self.start.x.saturating_add(self.extent.x),
      y: self.start.y.saturating_add(self.extent.y),
    }
  }

  /// Normalized box spanning both endpoints.
  pub fn bounds(&self) -> Rect {
    let end = self.end();
    let x = self.start.x.min(end.x);
    let y = self.start.y.min(end.y);
    Rect::new(x, y, self.extent.x.saturating_abs(), self.extent.y.saturating_abs())
  }
}

impl HasLine for ArrowOverlay {
  fn line_mut(&mut self) -> &mut LineStyle {
    &mut self.line
  }
}

static CAPABILITIES: LazyLock<CapabilityRegistry<ArrowOverlay>> = LazyLock::new(|| {
  CapabilityRegistry::<ArrowOverlay>::new()
    .with(Field::LineThickness, set_line_thickness)
    .with(Field::LineColor, set_line_color)
    .with(Field::FillColor, set_fill_color)
    .with(Field::Shadow, set_shadow)
});

impl Styleable for ArrowOverlay {
  fn capabilities() -> &'static CapabilityRegistry<Self> {
    &CAPABILITIES
  }
}
