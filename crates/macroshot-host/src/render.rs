use image::{RgbaImage, imageops};
use macroshot_surface::{
  ArrowOverlay, Color, FontSpec, ImageDocument, LineStyle, ObfuscateOverlay, ObfuscatePreset,
  Overlay, Pixels, Point, Rect, Size,
};

use crate::error::HostError;

/// Flattens documents and measures text.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Renderer: Send + Sync {
  /// Paint every overlay, in order, onto a copy of the document pixels.
  fn render(&self, document: &ImageDocument) -> Result<Pixels, HostError>;

  /// The size `text` occupies when drawn with `font`.
  fn measure_text(&self, text: &str, font: &FontSpec) -> Size;
}

/// A software renderer.
///
/// Shapes, arrows and pixelation are rasterized directly; blur uses
/// `image::imageops`. Geometry is clipped to the canvas. Text boxes
/// are painted without glyphs and text metrics are estimated from the font
/// size. Shadows are not drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterRenderer;

impl Renderer for RasterRenderer {
  fn render(&self, document: &ImageDocument) -> Result<Pixels, HostError> {
    let mut canvas = document.pixels().clone();
    for overlay in document.overlays() {
      match overlay {
        Overlay::Rectangle(rect) => draw_box(&mut canvas, rect.bounds, &rect.line),
        Overlay::Text(text) => draw_box(&mut canvas, text.bounds, &text.line),
        Overlay::Arrow(arrow) => draw_arrow(&mut canvas, arrow),
        Overlay::Obfuscate(obfuscate) => draw_obfuscation(&mut canvas, obfuscate),
      }
    }
    Ok(canvas)
  }

  fn measure_text(&self, text: &str, font: &FontSpec) -> Size {
    let advance = if font.bold { 0.65 } else { 0.6 };
    let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let lines = text.lines().count().max(1);
    Size::new(
      (longest as f32 * font.size * advance).ceil() as u32,
      (lines as f32 * font.size * 1.25).ceil() as u32,
    )
  }
}

fn fill_rect(canvas: &mut Pixels, area: Rect, color: Color) {
  if color.is_transparent() {
    return;
  }
  let Some(area) = canvas.area().intersect(&area) else {
    return;
  };
  for y in area.y..area.bottom() {
    for x in area.x..area.right() {
      canvas.blend(x, y, color);
    }
  }
}

fn draw_box(canvas: &mut Pixels, bounds: Rect, line: &LineStyle) {
  let t = line.thickness.max(0);
  let inset = t.saturating_mul(2);
  let inner_height = bounds.height.saturating_sub(inset);
  fill_rect(
    canvas,
    Rect::new(
      bounds.x.saturating_add(t),
      bounds.y.saturating_add(t),
      bounds.width.saturating_sub(inset),
      inner_height,
    ),
    line.fill,
  );
  if t == 0 {
    return;
  }
  let inner_y = bounds.y.saturating_add(t);
  fill_rect(canvas, Rect::new(bounds.x, bounds.y, bounds.width, t), line.color);
  fill_rect(canvas, Rect::new(bounds.x, bounds.bottom().saturating_sub(t), bounds.width, t), line.color);
  fill_rect(canvas, Rect::new(bounds.x, inner_y, t, inner_height), line.color);
  fill_rect(canvas, Rect::new(bounds.right().saturating_sub(t), inner_y, t, inner_height), line.color);
}

/// Clip a segment to `area` (Liang-Barsky), or `None` if it misses.
fn clip_segment(from: Point, to: Point, area: Rect) -> Option<(Point, Point)> {
  let (x0, y0) = (from.x as f64, from.y as f64);
  let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
  let (left, top) = (area.x as f64, area.y as f64);
  let (right, bottom) = (area.right() as f64 - 1.0, area.bottom() as f64 - 1.0);

  let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
  for (p, q) in [(-dx, x0 - left), (dx, right - x0), (-dy, y0 - top), (dy, bottom - y0)] {
    if p == 0.0 {
      if q < 0.0 {
        return None;
      }
      continue;
    }
    let r = q / p;
    if p < 0.0 {
      if r > t1 {
        return None;
      }
      t0 = t0.max(r);
    } else {
      if r < t0 {
        return None;
      }
      t1 = t1.min(r);
    }
  }

  let at = |t: f64| Point {
    x: (x0 + t * dx).round() as i32,
    y: (y0 + t * dy).round() as i32,
  };
  Some((at(t0), at(t1)))
}

fn draw_line(canvas: &mut Pixels, from: Point, to: Point, thickness: i32, color: Color) {
  // A pen wider than twice the canvas covers it from anywhere inside the clip area.
  let limit = (canvas.width().max(canvas.height()) as i32).saturating_mul(2).max(1);
  let size = thickness.clamp(1, limit);
  let half = size / 2;
  let reach = Rect::new(
    -half,
    -half,
    (canvas.width() as i32).saturating_add(size),
    (canvas.height() as i32).saturating_add(size),
  );
  let Some((from, to)) = clip_segment(from, to, reach) else {
    return;
  };

  let (x1, y1) = (to.x as i64, to.y as i64);
  let (dx, dy) = ((x1 - from.x as i64).abs(), -(y1 - from.y as i64).abs());
  let (sx, sy) = (if from.x < to.x { 1 } else { -1 }, if from.y < to.y { 1 } else { -1 });
  let (mut x, mut y, mut err) = (from.x as i64, from.y as i64, dx + dy);
  loop {
    fill_rect(canvas, Rect::new(x as i32 - half, y as i32 - half, size, size), color);
    if x == x1 && y == y1 {
      break;
    }
    let e2 = 2 * err;
    if e2 >= dy {
      err += dy;
      x += sx;
    }
    if e2 <= dx {
      err += dx;
      y += sy;
    }
  }
}

fn draw_arrow(canvas: &mut Pixels, arrow: &ArrowOverlay) {
  let (start, end) = (arrow.start, arrow.end());
  let line = &arrow.line;
  if line.thickness == 0 {
    return;
  }
  draw_line(canvas, start, end, line.thickness, line.color);

  let angle = (end.y as f64 - start.y as f64).atan2(end.x as f64 - start.x as f64);
  let head = 8.0 + 3.0 * line.thickness as f64;
  for spread in [0.5_f64, -0.5] {
    let wing = Point {
      x: (end.x as f64 - head * (angle + spread).cos()).round() as i32,
      y: (end.y as f64 - head * (angle + spread).sin()).round() as i32,
    };
    draw_line(canvas, end, wing, line.thickness, line.color);
  }
}

fn draw_obfuscation(canvas: &mut Pixels, overlay: &ObfuscateOverlay) {
  if let Some(area) = canvas.area().intersect(&overlay.bounds) {
    match overlay.preset {
      ObfuscatePreset::Pixelate => pixelate(canvas, area, overlay.pixel_size.max(1)),
      ObfuscatePreset::Blur => blur(canvas, area, overlay.blur_radius),
    }
  }
  if overlay.line_thickness > 0 {
    let line = LineStyle {
      thickness: overlay.line_thickness,
      color: overlay.line_color,
      fill: Color::TRANSPARENT,
      shadow: overlay.shadow,
    };
    draw_box(canvas, overlay.bounds, &line);
  }
}

fn average(canvas: &Pixels, area: Rect) -> Color {
  let mut sum = [0u64; 4];
  let mut count = 0u64;
  for y in area.y..area.bottom() {
    for x in area.x..area.right() {
      if let Some(c) = canvas.get(x, y) {
        sum[0] += c.r as u64;
        sum[1] += c.g as u64;
        sum[2] += c.b as u64;
        sum[3] += c.a as u64;
        count += 1;
      }
    }
  }
  if count == 0 {
    return Color::TRANSPARENT;
  }
  Color::rgba(
    (sum[0] / count) as u8,
    (sum[1] / count) as u8,
    (sum[2] / count) as u8,
    (sum[3] / count) as u8,
  )
}

fn pixelate(canvas: &mut Pixels, area: Rect, block: i32) {
  let mut y = area.y;
  while y < area.bottom() {
    let mut x = area.x;
    while x < area.right() {
      let cell = Rect::new(x, y, block.min(area.right() - x), block.min(area.bottom() - y));
      let color = average(canvas, cell);
      for cy in cell.y..cell.bottom() {
        for cx in cell.x..cell.right() {
          canvas.set(cx, cy, color);
        }
      }
      x = x.saturating_add(block);
    }
    y = y.saturating_add(block);
  }
}

fn blur(canvas: &mut Pixels, area: Rect, radius: i32) {
  if radius <= 0 {
    return;
  }
  let Some(region) = canvas.crop(&area) else {
    return;
  };
  let (width, height) = (region.width(), region.height());
  let Some(image) = RgbaImage::from_raw(width, height, region.into_rgba()) else {
    return;
  };

  // Radii past the region size blur no further.
  let sigma = radius.min(width.max(height) as i32) as f32;
  let blurred = imageops::blur(&image, sigma);
  for (x, y, pixel) in blurred.enumerate_pixels() {
    let [r, g, b, a] = pixel.0;
    canvas.set(area.x + x as i32, area.y + y as i32, Color::rgba(r, g, b, a));
  }
}

#[cfg(test)]
mod tests {
  use chrono::Local;
  use macroshot_surface::RectangleOverlay;

  use super::*;

  fn document(width: u32, height: u32) -> ImageDocument {
    ImageDocument::new(Pixels::filled(width, height, Color::WHITE), Local::now())
  }

  #[test]
  fn test_render_without_overlays_is_identity() {
    let doc = document(5, 5);
    assert_eq!(RasterRenderer.render(&doc).unwrap(), *doc.pixels());
  }

  #[test]
  fn test_rectangle_outline() {
    let mut doc = document(20, 20);
    doc.add_overlay(RectangleOverlay {
      bounds: Rect::new(2, 2, 10, 10),
      line: LineStyle {
        thickness: 1,
        color: Color::RED,
        fill: Color::TRANSPARENT,
        shadow: false,
      },
    });

    let out = RasterRenderer.render(&doc).unwrap();
    assert_eq!(out.get(2, 2), Some(Color::RED));
    assert_eq!(out.get(11, 11), Some(Color::RED));
    assert_eq!(out.get(5, 5), Some(Color::WHITE));
    assert_eq!(out.get(15, 15), Some(Color::WHITE));
  }

  #[test]
  fn test_arrow_reaches_both_ends() {
    let mut doc = document(40, 40);
    doc.add_overlay(ArrowOverlay::between(Point { x: 5, y: 5 }, Point { x: 30, y: 20 }));
    let out = RasterRenderer.render(&doc).unwrap();
    assert_eq!(out.get(5, 5), Some(Color::RED));
    assert_eq!(out.get(30, 20), Some(Color::RED));
  }

  #[test]
  fn test_pixelate_averages_blocks() {
    let mut pixels = Pixels::filled(4, 4, Color::WHITE);
    pixels.set(0, 0, Color::BLACK);
    let mut doc = ImageDocument::new(pixels, Local::now());
    doc.add_overlay(ObfuscateOverlay {
      bounds: Rect::new(0, 0, 2, 2),
      pixel_size: 2,
      ..ObfuscateOverlay::default()
    });

    let out = RasterRenderer.render(&doc).unwrap();
    let cell = out.get(1, 1).unwrap();
    assert_eq!(out.get(0, 0), Some(cell));
    assert!(cell.r > 180 && cell.r < 200);
    assert_eq!(out.get(3, 3), Some(Color::WHITE));
  }

  #[test]
  fn test_blur_stays_inside_bounds() {
    let mut pixels = Pixels::filled(10, 10, Color::WHITE);
    pixels.set(2, 2, Color::BLACK);
    let mut doc = ImageDocument::new(pixels, Local::now());
    doc.add_overlay(ObfuscateOverlay {
      bounds: Rect::new(0, 0, 5, 5),
      preset: ObfuscatePreset::Blur,
      blur_radius: 1,
      ..ObfuscateOverlay::default()
    });

    let out = RasterRenderer.render(&doc).unwrap();
    assert_ne!(out.get(2, 2), Some(Color::BLACK));
    assert_ne!(out.get(3, 3), Some(Color::WHITE));
    assert_eq!(out.get(7, 7), Some(Color::WHITE));
  }

  #[test]
  fn test_extreme_geometry_is_clipped() {
    let mut doc = document(16, 16);
    doc.add_overlay(RectangleOverlay {
      bounds: Rect::new(i32::MAX - 4, i32::MIN, i32::MAX, i32::MAX),
      line: LineStyle {
        thickness: 2_000_000_000,
        ..LineStyle::default()
      },
    });
    doc.add_overlay(RectangleOverlay {
      bounds: Rect::new(0, 0, 16, 16),
      line: LineStyle {
        thickness: 2_000_000_000,
        ..LineStyle::default()
      },
    });
    let mut arrow = ArrowOverlay::between(Point { x: i32::MIN, y: 8 }, Point { x: i32::MAX, y: 8 });
    arrow.line.thickness = i32::MAX;
    doc.add_overlay(arrow);
    doc.add_overlay(ObfuscateOverlay {
      bounds: Rect::new(0, 0, 16, 16),
      pixel_size: i32::MAX,
      ..ObfuscateOverlay::default()
    });
    doc.add_overlay(ObfuscateOverlay {
      bounds: Rect::new(0, 0, 16, 16),
      preset: ObfuscatePreset::Blur,
      blur_radius: i32::MAX,
      ..ObfuscateOverlay::default()
    });

    let out = RasterRenderer.render(&doc).unwrap();
    assert_eq!((out.width(), out.height()), (16, 16));
  }

  #[test]
  fn test_offscreen_line_draws_nothing() {
    let mut doc = document(10, 10);
    doc.add_overlay(ArrowOverlay::between(Point { x: -500, y: -500 }, Point { x: -400, y: -450 }));
    assert_eq!(RasterRenderer.render(&doc).unwrap(), *doc.pixels());
  }

  #[test]
  fn test_measure_text_grows_with_font() {
    let small = RasterRenderer.measure_text("hello", &FontSpec::default());
    let large = RasterRenderer.measure_text(
      "hello",
      &FontSpec {
        size: 22.0,
        ..FontSpec::default()
      },
    );
    assert!(large.width > small.width && large.height > small.height);
    assert_eq!(RasterRenderer.measure_text("", &FontSpec::default()).width, 0);
  }
}
