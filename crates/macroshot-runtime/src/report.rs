//! Per-step results.

use std::fmt;
use std::path::PathBuf;

use macroshot_surface::StyleIssue;

/// A non-fatal problem met while running a step.
#[derive(Debug, Clone, PartialEq)]
pub enum RunWarning {
  /// An element or destination kind this version does not know.
  UnrecognizedKind { index: usize, kind: String },

  /// An element without the geometry its kind places it with.
  MissingGeometry { element_index: usize, field: &'static str },

  /// A style key that could not be applied as written.
  Style { element_index: usize, issue: StyleIssue },
}

impl fmt::Display for RunWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnrecognizedKind { index, kind } => write!(f, "entry {}: unrecognized kind '{}'", index, kind),
      Self::MissingGeometry { element_index, field } => {
        write!(f, "element {}: missing '{}', using default geometry", element_index, field)
      }
      Self::Style { element_index, issue } => write!(f, "element {}: {}", element_index, issue),
    }
  }
}

/// Where an export delivered the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
  File(PathBuf),
  Clipboard,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotateReport {
  /// Overlays added to the document.
  pub placed: usize,
  pub warnings: Vec<RunWarning>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
  pub deliveries: Vec<Delivery>,
  pub warnings: Vec<RunWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
  Completed,
  /// Unrecognized step kind, not executed.
  Skipped,
  Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
  pub step_index: usize,
  pub step: String,
  pub status: StepStatus,
  pub warnings: Vec<RunWarning>,
  pub deliveries: Vec<Delivery>,
}

impl StepOutcome {
  pub(crate) fn new(step_index: usize, step: &str, status: StepStatus) -> Self {
    Self {
      step_index,
      step: step.to_string(),
      status,
      warnings: Vec::new(),
      deliveries: Vec::new(),
    }
  }
}
