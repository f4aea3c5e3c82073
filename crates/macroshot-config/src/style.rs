use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// A raw style value as written in the script.
///
/// The type a value is coerced to is decided by the field it lands on,
/// not by the JSON type it was written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
  Bool(bool),
  Integer(i64),
  Float(f64),
  Text(String),
}

impl fmt::Display for StyleValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Bool(b) => write!(f, "{}", b),
      Self::Integer(i) => write!(f, "{}", i),
      Self::Float(x) => write!(f, "{}", x),
      Self::Text(s) => write!(f, "{:?}", s),
    }
  }
}

impl From<bool> for StyleValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i64> for StyleValue {
  fn from(value: i64) -> Self {
    Self::Integer(value)
  }
}

impl From<f64> for StyleValue {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<&str> for StyleValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

/// An open, ordered mapping of style keys to values, e.g.
/// `{ "line_color": "#00FF00", "line_thickness": 3, "shadow": false }`.
///
/// Keys are kept verbatim; normalization happens when the style is applied.
/// Keys whose value is `null` are dropped on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleSet(IndexMap<String, StyleValue>);

impl<'de> Deserialize<'de> for StyleSet {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = IndexMap::<String, Option<StyleValue>>::deserialize(deserializer)?;
    Ok(Self(
      raw.into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect(),
    ))
  }
}

impl StyleSet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
    self.0.insert(key.into(), value.into());
  }

  /// Builder-style insert.
  pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
    self.insert(key, value);
    self
  }

  pub fn get(&self, key: &str) -> Option<&StyleValue> {
    self.0.get(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleSet {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}
