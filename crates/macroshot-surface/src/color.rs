use std::fmt;

/// A straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

impl Color {
  pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0);
  pub const BLACK: Color = Color::rgb(0, 0, 0);
  pub const WHITE: Color = Color::rgb(255, 255, 255);
  pub const RED: Color = Color::rgb(255, 0, 0);
  pub const GRAY: Color = Color::rgb(128, 128, 128);

  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  pub fn is_transparent(&self) -> bool {
    self.a == 0
  }

  /// Parse an HTML-style color.
  ///
  /// Accepts `transparent`, `#RGB`, `#RRGGBB`, `#AARRGGBB` and the common
  /// named colors, all case-insensitive.
  pub fn parse(input: &str) -> Option<Color> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("transparent") {
      return Some(Self::TRANSPARENT);
    }
    match input.strip_prefix('#') {
      Some(hex) => parse_hex(hex),
      None => named(input),
    }
  }

  /// Composite `self` over `below`.
  pub fn over(self, below: Color) -> Color {
    let src_a = self.a as u32;
    if src_a == 255 {
      return self;
    }
    if src_a == 0 {
      return below;
    }
    let dst_a = below.a as u32 * (255 - src_a) / 255;
    let out_a = src_a + dst_a;
    let channel = |s: u8, d: u8| ((s as u32 * src_a + d as u32 * dst_a) / out_a) as u8;
    Color {
      r: channel(self.r, below.r),
      g: channel(self.g, below.g),
      b: channel(self.b, below.b),
      a: out_a as u8,
    }
  }

  /// Perceived distance to another color, the largest per-channel delta.
  pub fn difference(&self, other: &Color) -> u8 {
    [
      self.r.abs_diff(other.r),
      self.g.abs_diff(other.g),
      self.b.abs_diff(other.b),
      self.a.abs_diff(other.a),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a == 255 {
      write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    } else {
      write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
  }
}

fn parse_hex(hex: &str) -> Option<Color> {
  if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  }
  let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
  match hex.len() {
    3 => {
      let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
      Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
    }
    6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
    8 => Some(Color::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
    _ => None,
  }
}

const NAMED: &[(&str, Color)] = &[
  ("black", Color::rgb(0, 0, 0)),
  ("white", Color::rgb(255, 255, 255)),
  ("red", Color::rgb(255, 0, 0)),
  ("lime", Color::rgb(0, 255, 0)),
  ("green", Color::rgb(0, 128, 0)),
  ("blue", Color::rgb(0, 0, 255)),
  ("yellow", Color::rgb(255, 255, 0)),
  ("cyan", Color::rgb(0, 255, 255)),
  ("aqua", Color::rgb(0, 255, 255)),
  ("magenta", Color::rgb(255, 0, 255)),
  ("fuchsia", Color::rgb(255, 0, 255)),
  ("gray", Color::rgb(128, 128, 128)),
  ("grey", Color::rgb(128, 128, 128)),
  ("silver", Color::rgb(192, 192, 192)),
  ("darkgray", Color::rgb(169, 169, 169)),
  ("lightgray", Color::rgb(211, 211, 211)),
  ("maroon", Color::rgb(128, 0, 0)),
  ("darkred", Color::rgb(139, 0, 0)),
  ("olive", Color::rgb(128, 128, 0)),
  ("navy", Color::rgb(0, 0, 128)),
  ("purple", Color::rgb(128, 0, 128)),
  ("teal", Color::rgb(0, 128, 128)),
  ("orange", Color::rgb(255, 165, 0)),
  ("darkorange", Color::rgb(255, 140, 0)),
  ("gold", Color::rgb(255, 215, 0)),
  ("pink", Color::rgb(255, 192, 203)),
  ("hotpink", Color::rgb(255, 105, 180)),
  ("brown", Color::rgb(165, 42, 42)),
  ("violet", Color::rgb(238, 130, 238)),
  ("indigo", Color::rgb(75, 0, 130)),
  ("crimson", Color::rgb(220, 20, 60)),
  ("tomato", Color::rgb(255, 99, 71)),
  ("coral", Color::rgb(255, 127, 80)),
  ("salmon", Color::rgb(250, 128, 114)),
  ("khaki", Color::rgb(240, 230, 140)),
  ("beige", Color::rgb(245, 245, 220)),
  ("skyblue", Color::rgb(135, 206, 235)),
  ("steelblue", Color::rgb(70, 130, 180)),
  ("royalblue", Color::rgb(65, 105, 225)),
  ("darkblue", Color::rgb(0, 0, 139)),
  ("darkgreen", Color::rgb(0, 100, 0)),
  ("limegreen", Color::rgb(50, 205, 50)),
  ("turquoise", Color::rgb(64, 224, 208)),
];

fn named(name: &str) -> Option<Color> {
  NAMED
    .iter()
    .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
    .map(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_hex_forms() {
    assert_eq!(Color::parse("#00FF00"), Some(Color::rgb(0, 255, 0)));
    assert_eq!(Color::parse("#0f0"), Some(Color::rgb(0, 255, 0)));
    assert_eq!(Color::parse("#80FF0000"), Some(Color::rgba(255, 0, 0, 128)));
  }

  #[test]
  fn test_parse_names() {
    assert_eq!(Color::parse("Navy"), Some(Color::rgb(0, 0, 128)));
    assert!(Color::parse("TRANSPARENT").unwrap().is_transparent());
  }

  #[test]
  fn test_parse_rejects() {
    assert_eq!(Color::parse("not-a-color"), None);
    assert_eq!(Color::parse("#12345"), None);
    assert_eq!(Color::parse("#GGGGGG"), None);
    assert_eq!(Color::parse(""), None);
  }

  #[test]
  fn test_display() {
    assert_eq!(Color::RED.to_string(), "#FF0000");
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#04010203");
  }

  #[test]
  fn test_over() {
    assert_eq!(Color::RED.over(Color::rgb(0, 0, 255)), Color::RED);
    assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    let half = Color::rgba(0, 0, 0, 128).over(Color::WHITE);
    assert_eq!(half.a, 255);
    assert!(half.r > 120 && half.r < 135);
  }
}
