use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::decode::ObjectReader;
use crate::error::ScriptError;
use crate::tagged::{TypeTagged, Unrecognized};

/// Where an export step delivers the flattened image.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
  File(FileDestination),
  Clipboard,
  /// A destination kind this version cannot deliver to. Skipped at run time.
  Unrecognized(Unrecognized),
}

impl Destination {
  pub fn file(path: impl Into<String>) -> Self {
    Self::File(FileDestination {
      path: Some(path.into()),
      overwrite: None,
    })
  }

  pub fn kind(&self) -> &str {
    match self {
      Self::File(_) => "file",
      Self::Clipboard => "clipboard",
      Self::Unrecognized(raw) => &raw.kind,
    }
  }

  pub(crate) fn from_value(path: String, value: Value) -> Result<Self, ScriptError> {
    let mut reader = ObjectReader::new(path, value)?;
    let kind: String = reader.required("type")?;

    let destination = match kind.to_ascii_lowercase().as_str() {
      "file" => Self::File(FileDestination {
        path: reader.optional("path")?,
        overwrite: reader.optional("overwrite")?,
      }),
      "clipboard" => Self::Clipboard,
      _ => Self::Unrecognized(Unrecognized {
        kind,
        fields: reader.into_fields(),
      }),
    };

    Ok(destination)
  }
}

impl Serialize for Destination {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let kind = self.kind();
    match self {
      Self::File(body) => TypeTagged { kind, body }.serialize(serializer),
      Self::Clipboard => TypeTagged {
        kind,
        body: &Map::new(),
      }
      .serialize(serializer),
      Self::Unrecognized(raw) => TypeTagged {
        kind,
        body: &raw.fields,
      }
      .serialize(serializer),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FileDestination {
  /// Output path; may contain a `{timestamp}` placeholder.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  /// Reserved. Existing files are always replaced.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub overwrite: Option<bool>,
}
