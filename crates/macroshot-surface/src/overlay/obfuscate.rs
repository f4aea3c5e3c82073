use std::sync::LazyLock;

use macroshot_config::Rect;

use crate::color::Color;
use crate::field::{Field, FieldError, FieldValue};
use crate::registry::{CapabilityRegistry, Styleable, at_least_one, non_negative, unit_fraction};

/// The filter an obfuscation applies. Only one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObfuscatePreset {
  #[default]
  Pixelate,
  Blur,
}

impl ObfuscatePreset {
  /// Parse a method name such as `blur` or `pixelate`.
  pub fn from_method(method: &str) -> Option<Self> {
    match method.trim().to_ascii_lowercase().as_str() {
      "blur" => Some(Self::Blur),
      "pixelate" | "pixelize" | "pixel" => Some(Self::Pixelate),
      _ => None,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::Pixelate => "pixelate",
      Self::Blur => "blur",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObfuscateOverlay {
  pub bounds: Rect,
  pub preset: ObfuscatePreset,
  pub line_thickness: i32,
  pub line_color: Color,
  pub shadow: bool,
  pub pixel_size: i32,
  pub blur_radius: i32,
  pub preview_quality: f32,
}

impl Default for ObfuscateOverlay {
  fn default() -> Self {
    Self {
      bounds: Rect::new(0, 0, 0, 0),
      preset: ObfuscatePreset::default(),
      line_thickness: 0,
      line_color: Color::RED,
      shadow: false,
      pixel_size: 5,
      blur_radius: 3,
      preview_quality: 1.0,
    }
  }
}

fn set_line_thickness(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.line_thickness = non_negative(Field::LineThickness, value)?;
  Ok(())
}

fn set_line_color(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.line_color = value.as_color(Field::LineColor)?;
  Ok(())
}

fn set_shadow(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.shadow = value.as_bool(Field::Shadow)?;
  Ok(())
}

fn set_pixel_size(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.pixel_size = at_least_one(Field::PixelSize, value)?;
  Ok(())
}

fn set_blur_radius(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.blur_radius = non_negative(Field::BlurRadius, value)?;
  Ok(())
}

fn set_preview_quality(o: &mut ObfuscateOverlay, value: FieldValue) -> Result<(), FieldError> {
  o.preview_quality = unit_fraction(Field::PreviewQuality, value)?;
  Ok(())
}

static CAPABILITIES: LazyLock<CapabilityRegistry<ObfuscateOverlay>> = LazyLock::new(|| {
  CapabilityRegistry::<ObfuscateOverlay>::new()
    .with(Field::LineThickness, set_line_thickness)
    .with(Field::LineColor, set_line_color)
    .with(Field::Shadow, set_shadow)
    .with(Field::PixelSize, set_pixel_size)
    .with(Field::BlurRadius, set_blur_radius)
    .with(Field::PreviewQuality, set_preview_quality)
});

impl Styleable for ObfuscateOverlay {
  fn capabilities() -> &'static CapabilityRegistry<Self> {
    &CAPABILITIES
  }

  fn exposes(&self, field: Field) -> bool {
    match field {
      Field::PixelSize => self.preset == ObfuscatePreset::Pixelate,
      Field::BlurRadius | Field::PreviewQuality => self.preset == ObfuscatePreset::Blur,
      other => Self::capabilities().contains(other),
    }
  }
}
