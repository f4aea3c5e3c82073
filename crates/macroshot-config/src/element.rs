use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::decode::ObjectReader;
use crate::error::ScriptError;
use crate::geometry::{Bounds, Point};
use crate::style::StyleSet;
use crate::tagged::{TypeTagged, Unrecognized};

/// An annotation overlay description, discriminated by its `type` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
  Rectangle(ShapeElement),
  Arrow(ArrowElement),
  Text(TextElement),
  Obfuscate(ObfuscateElement),
  /// An element kind this version cannot place. Skipped at run time.
  Unrecognized(Unrecognized),
}

impl Element {
  pub fn kind(&self) -> &str {
    match self {
      Self::Rectangle(_) => "rectangle",
      Self::Arrow(_) => "arrow",
      Self::Text(_) => "text",
      Self::Obfuscate(_) => "obfuscate",
      Self::Unrecognized(raw) => &raw.kind,
    }
  }

  pub fn style(&self) -> Option<&StyleSet> {
    match self {
      Self::Rectangle(e) => e.style.as_ref(),
      Self::Arrow(e) => e.style.as_ref(),
      Self::Text(e) => e.style.as_ref(),
      Self::Obfuscate(e) => e.style.as_ref(),
      Self::Unrecognized(_) => None,
    }
  }

  pub(crate) fn from_value(path: String, value: Value) -> Result<Self, ScriptError> {
    let mut reader = ObjectReader::new(path, value)?;
    let kind: String = reader.required("type")?;

    let element = match kind.to_ascii_lowercase().as_str() {
      "rectangle" => Self::Rectangle(ShapeElement {
        bounds: reader.optional("bounds")?,
        style: reader.optional("style")?,
      }),
      "arrow" => Self::Arrow(ArrowElement {
        from: reader.optional("from")?,
        to: reader.optional("to")?,
        style: reader.optional("style")?,
      }),
      "text" => Self::Text(TextElement {
        position: reader.optional("position")?,
        content: reader.optional("content")?,
        style: reader.optional("style")?,
      }),
      "obfuscate" => Self::Obfuscate(ObfuscateElement {
        bounds: reader.optional("bounds")?,
        method: reader.optional("method")?,
        pixel_size: reader.optional("pixel_size")?,
        style: reader.optional("style")?,
      }),
      _ => Self::Unrecognized(Unrecognized {
        kind,
        fields: reader.into_fields(),
      }),
    };

    Ok(element)
  }
}

impl Serialize for Element {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let kind = self.kind();
    match self {
      Self::Rectangle(body) => TypeTagged { kind, body }.serialize(serializer),
      Self::Arrow(body) => TypeTagged { kind, body }.serialize(serializer),
      Self::Text(body) => TypeTagged { kind, body }.serialize(serializer),
      Self::Obfuscate(body) => TypeTagged { kind, body }.serialize(serializer),
      Self::Unrecognized(raw) => TypeTagged {
        kind,
        body: &raw.fields,
      }
      .serialize(serializer),
    }
  }
}

/// A box-shaped element (rectangle).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShapeElement {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bounds: Option<Bounds>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<StyleSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArrowElement {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub from: Option<Point>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub to: Option<Point>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<StyleSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextElement {
  /// Top-left anchor of the text box.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position: Option<Point>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<StyleSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObfuscateElement {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bounds: Option<Bounds>,
  /// `blur` or `pixelate`. Only consulted when the style names neither
  /// a blur nor a pixelation parameter.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pixel_size: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub style: Option<StyleSet>,
}
