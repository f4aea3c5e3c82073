use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::decode::ObjectReader;
use crate::destination::Destination;
use crate::element::Element;
use crate::error::ScriptError;
use crate::geometry::Rect;
use crate::tagged::{StepTagged, Unrecognized};

/// One unit of work in a workflow, discriminated by its `step` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
  Capture(CaptureStep),
  Annotate(AnnotateStep),
  Export(ExportStep),
  /// A step kind this version cannot execute. Skipped at run time.
  Unrecognized(Unrecognized),
}

impl Step {
  /// The `step` discriminator as written (normalized for known kinds).
  pub fn kind(&self) -> &str {
    match self {
      Self::Capture(_) => "capture",
      Self::Annotate(_) => "annotate",
      Self::Export(_) => "export",
      Self::Unrecognized(raw) => &raw.kind,
    }
  }

  pub(crate) fn from_value(path: String, value: Value) -> Result<Self, ScriptError> {
    let mut reader = ObjectReader::new(path, value)?;
    let kind: String = reader.required("step")?;

    let step = match kind.to_ascii_lowercase().as_str() {
      "capture" => Self::Capture(CaptureStep {
        mode: reader.required("type")?,
        area: reader.optional("area")?,
        path: reader.optional("path")?,
        options: reader.optional("options")?,
        autocrop: reader.optional("autocrop")?,
        autocrop_difference: reader.optional("autocrop_difference")?,
      }),
      "annotate" => Self::Annotate(AnnotateStep {
        elements: reader.list("elements", Element::from_value)?,
      }),
      "export" => Self::Export(ExportStep {
        destinations: reader.list("destinations", Destination::from_value)?,
      }),
      _ => Self::Unrecognized(Unrecognized {
        kind,
        fields: reader.into_fields(),
      }),
    };

    Ok(step)
  }
}

impl Serialize for Step {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let step = self.kind();
    match self {
      Self::Capture(body) => StepTagged { step, body }.serialize(serializer),
      Self::Annotate(body) => StepTagged { step, body }.serialize(serializer),
      Self::Export(body) => StepTagged { step, body }.serialize(serializer),
      Self::Unrecognized(raw) => StepTagged {
        step,
        body: &raw.fields,
      }
      .serialize(serializer),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureStep {
  #[serde(rename = "type")]
  pub mode: CaptureMode,
  /// Required when `mode` is `region`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub area: Option<Rect>,
  /// Required when `mode` is `file`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub options: Option<CaptureOptions>,
  /// Overrides the process-wide auto-crop default.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub autocrop: Option<bool>,
  /// Overrides the process-wide auto-crop color difference threshold.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub autocrop_difference: Option<i32>,
}

impl CaptureStep {
  pub fn new(mode: CaptureMode) -> Self {
    Self {
      mode,
      area: None,
      path: None,
      options: None,
      autocrop: None,
      autocrop_difference: None,
    }
  }

  pub fn fullscreen() -> Self {
    Self::new(CaptureMode::Fullscreen)
  }

  pub fn region(area: Rect) -> Self {
    Self {
      area: Some(area),
      ..Self::new(CaptureMode::Region)
    }
  }

  pub fn file(path: impl Into<String>) -> Self {
    Self {
      path: Some(path.into()),
      ..Self::new(CaptureMode::File)
    }
  }
}

/// Where capture pixels come from.
///
/// Matching is case-insensitive. Unknown modes decode as `Other` and fail
/// when the step executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaptureMode {
  Fullscreen,
  Region,
  File,
  Other(String),
}

impl From<String> for CaptureMode {
  fn from(value: String) -> Self {
    match value.to_ascii_lowercase().as_str() {
      "fullscreen" => Self::Fullscreen,
      "region" => Self::Region,
      "file" => Self::File,
      _ => Self::Other(value),
    }
  }
}

impl From<CaptureMode> for String {
  fn from(mode: CaptureMode) -> Self {
    match mode {
      CaptureMode::Fullscreen => "fullscreen".to_string(),
      CaptureMode::Region => "region".to_string(),
      CaptureMode::File => "file".to_string(),
      CaptureMode::Other(raw) => raw,
    }
  }
}

/// Screen acquisition options. Ignored for `file` captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
  pub show_cursor: bool,
  /// Wait before acquiring pixels, e.g. to let a menu open.
  pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnnotateStep {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportStep {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub destinations: Vec<Destination>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn decode(value: Value) -> Result<Step, ScriptError> {
    Step::from_value("$.workflow[0]".to_string(), value)
  }

  #[test]
  fn test_capture_region() {
    let step = decode(json!({
      "step": "capture",
      "type": "region",
      "area": { "x": 10, "y": 20, "width": 300, "height": 200 },
      "autocrop": true,
      "autocrop_difference": 25
    }))
    .unwrap();

    let Step::Capture(capture) = step else {
      panic!("expected capture step");
    };
    assert_eq!(capture.mode, CaptureMode::Region);
    assert_eq!(
      capture.area,
      Some(Rect {
        x: 10,
        y: 20,
        width: 300,
        height: 200
      })
    );
    assert_eq!(capture.autocrop, Some(true));
    assert_eq!(capture.autocrop_difference, Some(25));
  }

  #[test]
  fn test_capture_builder_area_keys() {
    let step = decode(json!({
      "step": "capture",
      "type": "region",
      "area": { "X": 1, "Y": 2, "Width": 800, "Height": 600 }
    }))
    .unwrap();

    let Step::Capture(capture) = step else {
      panic!("expected capture step");
    };
    assert_eq!(capture.area.map(|a| a.width), Some(800));
  }

  #[test]
  fn test_kind_is_case_insensitive() {
    let step = decode(json!({ "step": "Capture", "type": "FullScreen" })).unwrap();
    assert_eq!(step, Step::Capture(CaptureStep::fullscreen()));
  }

  #[test]
  fn test_unknown_capture_mode() {
    let step = decode(json!({ "step": "capture", "type": "window" })).unwrap();
    let Step::Capture(capture) = step else {
      panic!("expected capture step");
    };
    assert_eq!(capture.mode, CaptureMode::Other("window".to_string()));
  }

  #[test]
  fn test_unrecognized_step_keeps_fields() {
    let step = decode(json!({ "step": "upload", "url": "https://example.com" })).unwrap();
    let Step::Unrecognized(raw) = &step else {
      panic!("expected unrecognized step");
    };
    assert_eq!(raw.kind, "upload");
    assert_eq!(raw.fields["url"], "https://example.com");
    assert_eq!(
      serde_json::to_value(&step).unwrap(),
      json!({ "step": "upload", "url": "https://example.com" })
    );
  }

  #[test]
  fn test_missing_step_key() {
    let err = decode(json!({ "type": "fullscreen" })).unwrap_err();
    assert_eq!(err.path(), Some("$.workflow[0].step"));
  }

  #[test]
  fn test_capture_requires_type() {
    let err = decode(json!({ "step": "capture" })).unwrap_err();
    assert_eq!(err.path(), Some("$.workflow[0].type"));
  }

  #[test]
  fn test_bad_area_cites_area() {
    let err = decode(json!({ "step": "capture", "type": "region", "area": { "x": 0 } })).unwrap_err();
    assert_eq!(err.path(), Some("$.workflow[0].area"));
  }

  #[test]
  fn test_options_defaults() {
    let step = decode(json!({ "step": "capture", "type": "fullscreen", "options": { "delay_ms": 250 } })).unwrap();
    let Step::Capture(capture) = step else {
      panic!("expected capture step");
    };
    assert_eq!(
      capture.options,
      Some(CaptureOptions {
        show_cursor: false,
        delay_ms: 250
      })
    );
  }

  #[test]
  fn test_serialize_omits_absent_fields() {
    let step = Step::Capture(CaptureStep::file("in.png"));
    assert_eq!(
      serde_json::to_value(&step).unwrap(),
      json!({ "step": "capture", "type": "file", "path": "in.png" })
    );

    let step = Step::Annotate(AnnotateStep::default());
    assert_eq!(serde_json::to_value(&step).unwrap(), json!({ "step": "annotate" }));
  }
}
