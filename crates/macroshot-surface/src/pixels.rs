use macroshot_config::Rect;

use crate::color::Color;

/// An owned RGBA8 pixel buffer, row-major without padding.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixels {
  width: u32,
  height: u32,
  data: Vec<u8>,
}

impl std::fmt::Debug for Pixels {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Pixels")
      .field("width", &self.width)
      .field("height", &self.height)
      .finish_non_exhaustive()
  }
}

impl Pixels {
  /// A buffer of the given size filled with one color.
  pub fn filled(width: u32, height: u32, color: Color) -> Self {
    let count = width as usize * height as usize;
    let mut data = Vec::with_capacity(count * 4);
    for _ in 0..count {
      data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
    }
    Self { width, height, data }
  }

  /// Wrap raw RGBA bytes. Returns `None` when the length does not match.
  pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
    (data.len() == width as usize * height as usize * 4).then_some(Self { width, height, data })
  }

  pub fn empty() -> Self {
    Self {
      width: 0,
      height: 0,
      data: Vec::new(),
    }
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }

  pub fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  /// The full image area at the origin.
  pub fn area(&self) -> Rect {
    Rect::new(0, 0, self.width as i32, self.height as i32)
  }

  pub fn as_rgba(&self) -> &[u8] {
    &self.data
  }

  pub fn into_rgba(self) -> Vec<u8> {
    self.data
  }

  fn offset(&self, x: i32, y: i32) -> Option<usize> {
    if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
      return None;
    }
    Some((y as usize * self.width as usize + x as usize) * 4)
  }

  pub fn get(&self, x: i32, y: i32) -> Option<Color> {
    let i = self.offset(x, y)?;
    let px = &self.data[i..i + 4];
    Some(Color::rgba(px[0], px[1], px[2], px[3]))
  }

  /// Overwrite one pixel. Out-of-bounds writes are ignored.
  pub fn set(&mut self, x: i32, y: i32, color: Color) {
    if let Some(i) = self.offset(x, y) {
      self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }
  }

  /// Composite one pixel over the existing one.
  pub fn blend(&mut self, x: i32, y: i32, color: Color) {
    if let Some(below) = self.get(x, y) {
      self.set(x, y, color.over(below));
    }
  }

  /// Copy out the part of the buffer inside `area`, clipped to the image.
  /// Returns `None` when nothing of the area lies on the image.
  pub fn crop(&self, area: &Rect) -> Option<Pixels> {
    let clipped = self.area().intersect(area)?;
    let mut out = Pixels::filled(clipped.width as u32, clipped.height as u32, Color::TRANSPARENT);
    let row_bytes = clipped.width as usize * 4;
    for row in 0..clipped.height {
      let src = (((clipped.y + row) as usize * self.width as usize) + clipped.x as usize) * 4;
      let dst = row as usize * row_bytes;
      out.data[dst..dst + row_bytes].copy_from_slice(&self.data[src..src + row_bytes]);
    }
    Some(out)
  }
}
