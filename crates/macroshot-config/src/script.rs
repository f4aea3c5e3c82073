use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::decode::{ObjectReader, ROOT};
use crate::destination::Destination;
use crate::element::Element;
use crate::error::ScriptError;
use crate::step::Step;

/// The script format version this crate writes.
pub const SUPPORTED_VERSION: &str = "1.0";

/// A complete workflow script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowScript {
  pub version: String,
  #[serde(rename = "workflow")]
  pub steps: Vec<Step>,
}

impl Default for WorkflowScript {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl WorkflowScript {
  /// Create a script at the supported version.
  pub fn new(steps: Vec<Step>) -> Self {
    Self {
      version: SUPPORTED_VERSION.to_string(),
      steps,
    }
  }

  pub fn from_json(json: &str) -> Result<Self, ScriptError> {
    Self::from_slice(json.as_bytes())
  }

  pub fn from_slice(bytes: &[u8]) -> Result<Self, ScriptError> {
    let value: Value = serde_json::from_slice(bytes)
      .map_err(|e| ScriptError::malformed(ROOT, format!("invalid JSON: {}", e)))?;
    Self::from_value(value)
  }

  pub fn from_value(value: Value) -> Result<Self, ScriptError> {
    let mut reader = ObjectReader::new(ROOT.to_string(), value)?;
    let version = reader.required("version")?;
    let steps = reader.list("workflow", Step::from_value)?;
    Ok(Self { version, steps })
  }

  /// Read and decode a script file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ScriptError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_slice(&bytes)
  }

  /// Write the script as pretty-printed JSON.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
    let path = path.as_ref();
    let json = self.to_json_pretty()?;
    std::fs::write(path, json).map_err(|source| ScriptError::Io {
      path: path.to_path_buf(),
      source,
    })
  }

  pub fn to_value(&self) -> Result<Value, ScriptError> {
    Ok(serde_json::to_value(self)?)
  }

  pub fn to_json(&self) -> Result<String, ScriptError> {
    Ok(serde_json::to_string(self)?)
  }

  pub fn to_json_pretty(&self) -> Result<String, ScriptError> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Whether the script's major version matches [`SUPPORTED_VERSION`].
  pub fn is_supported_version(&self) -> bool {
    major(&self.version) == major(SUPPORTED_VERSION)
  }

  /// Kinds of steps, elements and destinations this version cannot execute,
  /// with their paths.
  pub fn unrecognized_kinds(&self) -> Vec<(String, String)> {
    let mut found = Vec::new();
    for (index, step) in self.steps.iter().enumerate() {
      let path = format!("{}.workflow[{}]", ROOT, index);
      match step {
        Step::Unrecognized(raw) => found.push((path, raw.kind.clone())),
        Step::Annotate(annotate) => {
          for (i, element) in annotate.elements.iter().enumerate() {
            if let Element::Unrecognized(raw) = element {
              found.push((format!("{}.elements[{}]", path, i), raw.kind.clone()));
            }
          }
        }
        Step::Export(export) => {
          for (i, destination) in export.destinations.iter().enumerate() {
            if let Destination::Unrecognized(raw) = destination {
              found.push((format!("{}.destinations[{}]", path, i), raw.kind.clone()));
            }
          }
        }
        Step::Capture(_) => {}
      }
    }
    found
  }
}

impl<'de> Deserialize<'de> for WorkflowScript {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Self::from_value(value).map_err(serde::de::Error::custom)
  }
}

fn major(version: &str) -> &str {
  version.trim().split('.').next().unwrap_or_default()
}
