//! Path-aware decoding from `serde_json::Value`.
//!
//! Leaf types (areas, points, styles) derive `Deserialize`; the tagged types
//! walk their objects field by field through [`ObjectReader`] so an error can
//! name the exact field that failed.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ScriptError;

pub(crate) const ROOT: &str = "$";

/// Consumes the fields of one JSON object.
pub(crate) struct ObjectReader {
  path: String,
  map: Map<String, Value>,
}

impl ObjectReader {
  pub(crate) fn new(path: String, value: Value) -> Result<Self, ScriptError> {
    match value {
      Value::Object(map) => Ok(Self { path, map }),
      other => Err(ScriptError::malformed(
        path,
        format!("expected an object, found {}", describe(&other)),
      )),
    }
  }

  fn field_path(&self, key: &str) -> String {
    format!("{}.{}", self.path, key)
  }

  /// Take an optional field. `null` is treated as absent.
  pub(crate) fn optional<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, ScriptError> {
    match self.map.remove(key) {
      None | Some(Value::Null) => Ok(None),
      Some(value) => decode(self.field_path(key), value).map(Some),
    }
  }

  pub(crate) fn required<T: DeserializeOwned>(&mut self, key: &str) -> Result<T, ScriptError> {
    self
      .optional(key)?
      .ok_or_else(|| ScriptError::malformed(self.field_path(key), "missing required field"))
  }

  /// Take an array field, decoding every item with its indexed path.
  /// An absent array is empty.
  pub(crate) fn list<T>(
    &mut self,
    key: &str,
    decode_item: impl Fn(String, Value) -> Result<T, ScriptError>,
  ) -> Result<Vec<T>, ScriptError> {
    let path = self.field_path(key);
    match self.map.remove(key) {
      None | Some(Value::Null) => Ok(Vec::new()),
      Some(Value::Array(items)) => items
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_item(format!("{}[{}]", path, index), item))
        .collect(),
      Some(other) => Err(ScriptError::malformed(
        path,
        format!("expected an array, found {}", describe(&other)),
      )),
    }
  }

  /// Remaining, not yet consumed fields.
  pub(crate) fn into_fields(self) -> Map<String, Value> {
    self.map
  }
}

pub(crate) fn decode<T: DeserializeOwned>(path: String, value: Value) -> Result<T, ScriptError> {
  serde_json::from_value(value).map_err(|e| ScriptError::malformed(path, e.to_string()))
}

fn describe(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_rejects_non_object() {
    let err = ObjectReader::new("$.workflow[0]".to_string(), json!([1, 2])).err().unwrap();
    assert_eq!(err.path(), Some("$.workflow[0]"));
    assert!(err.to_string().contains("an array"));
  }

  #[test]
  fn test_null_is_absent() {
    let mut reader = ObjectReader::new(ROOT.to_string(), json!({ "path": null })).unwrap();
    let path: Option<String> = reader.optional("path").unwrap();
    assert_eq!(path, None);
  }

  #[test]
  fn test_required_names_field() {
    let mut reader = ObjectReader::new(ROOT.to_string(), json!({})).unwrap();
    let err = reader.required::<String>("version").unwrap_err();
    assert_eq!(err.path(), Some("$.version"));
  }

  #[test]
  fn test_list_indexes_items() {
    let mut reader = ObjectReader::new(ROOT.to_string(), json!({ "items": [1, "two"] })).unwrap();
    let err = reader
      .list("items", |path, value| decode::<i64>(path, value))
      .unwrap_err();
    assert_eq!(err.path(), Some("$.items[1]"));
  }
}
