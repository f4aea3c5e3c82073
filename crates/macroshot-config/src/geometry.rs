use serde::{Deserialize, Serialize};

/// A capture area in screen coordinates.
///
/// The capitalised keys written by the legacy macro builder
/// (`X`, `Y`, `Width`, `Height`) are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
  #[serde(alias = "X")]
  pub x: i32,
  #[serde(alias = "Y")]
  pub y: i32,
  #[serde(alias = "Width")]
  pub width: i32,
  #[serde(alias = "Height")]
  pub height: i32,
}

/// Element bounds: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
  pub x: i32,
  pub y: i32,
  pub w: i32,
  pub h: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Rect {
  pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
    Self { x, y, width, height }
  }

  /// True when the area covers no pixels.
  pub fn is_empty(&self) -> bool {
    self.width <= 0 || self.height <= 0
  }

  pub fn right(&self) -> i32 {
    self.x.saturating_add(self.width)
  }

  pub fn bottom(&self) -> i32 {
    self.y.saturating_add(self.height)
  }

  /// The overlapping part of two areas, if any.
  pub fn intersect(&self, other: &Rect) -> Option<Rect> {
    let x = self.x.max(other.x);
    let y = self.y.max(other.y);
    let right = self.right().min(other.right());
    let bottom = self.bottom().min(other.bottom());
    let clipped = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
    (!clipped.is_empty()).then_some(clipped)
  }
}

impl From<Bounds> for Rect {
  fn from(b: Bounds) -> Self {
    Rect::new(b.x, b.y, b.w, b.h)
  }
}
