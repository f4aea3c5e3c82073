use serde::Serialize;
use serde_json::{Map, Value};

/// An entry whose discriminator this version does not know.
///
/// The raw fields (minus the discriminator) are kept so the entry
/// serializes back unchanged; the runtime skips it with a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Unrecognized {
  pub kind: String,
  pub fields: Map<String, Value>,
}

impl Unrecognized {
  pub fn new(kind: impl Into<String>) -> Self {
    Self {
      kind: kind.into(),
      fields: Map::new(),
    }
  }
}

/// Serialization helper for entries discriminated by a `step` key.
#[derive(Serialize)]
pub(crate) struct StepTagged<'a, B> {
  pub step: &'a str,
  #[serde(flatten)]
  pub body: &'a B,
}

/// Serialization helper for entries discriminated by a `type` key.
#[derive(Serialize)]
pub(crate) struct TypeTagged<'a, B> {
  #[serde(rename = "type")]
  pub kind: &'a str,
  #[serde(flatten)]
  pub body: &'a B,
}
