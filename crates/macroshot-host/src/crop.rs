use macroshot_surface::{Color, Pixels, Rect};

/// Finds the content area of a capture.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait CropDetector: Send + Sync {
  /// The area to keep, or an empty rectangle when nothing should be cropped.
  ///
  /// `threshold` is the color difference below which a pixel counts as
  /// background.
  fn find_crop_rect(&self, pixels: &Pixels, threshold: i32) -> Rect;
}

/// Crops uniform borders.
///
/// Each corner is tried as the background color and the largest content
/// box found wins, so a border that only touches some corners still crops.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdCropDetector;

impl CropDetector for ThresholdCropDetector {
  fn find_crop_rect(&self, pixels: &Pixels, threshold: i32) -> Rect {
    let none = Rect::new(0, 0, 0, 0);
    if pixels.is_empty() {
      return none;
    }

    let (w, h) = (pixels.width() as i32, pixels.height() as i32);
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];

    let best = corners
      .into_iter()
      .filter_map(|(x, y)| pixels.get(x, y))
      .filter_map(|background| content_box(pixels, background, threshold))
      .max_by_key(|r| r.width as i64 * r.height as i64);

    match best {
      Some(rect) if rect != pixels.area() => rect,
      _ => none,
    }
  }
}

fn content_box(pixels: &Pixels, background: Color, threshold: i32) -> Option<Rect> {
  let (mut left, mut top) = (i32::MAX, i32::MAX);
  let (mut right, mut bottom) = (i32::MIN, i32::MIN);

  for y in 0..pixels.height() as i32 {
    for x in 0..pixels.width() as i32 {
      let Some(color) = pixels.get(x, y) else {
        continue;
      };
      if i32::from(color.difference(&background)) > threshold {
        left = left.min(x);
        top = top.min(y);
        right = right.max(x);
        bottom = bottom.max(y);
      }
    }
  }

  (left <= right).then(|| Rect::new(left, top, right - left + 1, bottom - top + 1))
}
