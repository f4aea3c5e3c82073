//! Workflow execution.

use std::path::Path;

use macroshot_config::{SUPPORTED_VERSION, Step, WorkflowScript};
use macroshot_surface::ImageDocument;
use tracing::{error, info, instrument, warn};

use crate::annotate::annotate;
use crate::capture::capture;
use crate::error::RuntimeError;
use crate::events::RunEvent;
use crate::export::export;
use crate::report::{Delivery, RunWarning, StepOutcome, StepStatus};
use crate::runtime::WorkflowRuntime;
use crate::state::RunState;

/// The step that stopped a run.
#[derive(Debug)]
pub struct RunAbort {
  pub step_index: usize,
  pub step: String,
  pub error: RuntimeError,
}

/// Result of a run.
#[derive(Debug)]
pub struct RunSummary {
  pub run_id: String,
  /// One entry per step reached, in script order. An aborted run ends with
  /// the failed step.
  pub outcomes: Vec<StepOutcome>,
  pub abort: Option<RunAbort>,
  /// The document active when the run ended.
  pub document: Option<ImageDocument>,
}

impl RunSummary {
  pub fn is_success(&self) -> bool {
    self.abort.is_none()
  }

  /// Files written by export steps, in order.
  pub fn written_files(&self) -> Vec<&Path> {
    self
      .outcomes
      .iter()
      .flat_map(|o| &o.deliveries)
      .filter_map(|d| match d {
        Delivery::File(path) => Some(path.as_path()),
        Delivery::Clipboard => None,
      })
      .collect()
  }

  pub fn warnings(&self) -> impl Iterator<Item = (usize, &RunWarning)> {
    self
      .outcomes
      .iter()
      .flat_map(|o| o.warnings.iter().map(move |w| (o.step_index, w)))
  }
}

/// A handle to a single run of a script.
///
/// Call `.wait()` to run it and get the summary.
pub struct RunExecution<'a> {
  runtime: &'a WorkflowRuntime,
  script: &'a WorkflowScript,
  run_id: String,
}

impl<'a> RunExecution<'a> {
  pub(crate) fn new(runtime: &'a WorkflowRuntime, script: &'a WorkflowScript, run_id: String) -> Self {
    Self {
      runtime,
      script,
      run_id,
    }
  }

  pub fn run_id(&self) -> &str {
    &self.run_id
  }

  /// Run every step in order, stopping at the first failure.
  #[instrument(name = "workflow_run", skip(self), fields(run_id = %self.run_id, steps = self.script.steps.len()))]
  pub fn wait(self) -> RunSummary {
    let run_id = self.run_id.clone();
    info!(run_id = %run_id, steps = self.script.steps.len(), "run_started");
    self.notify(RunEvent::RunStarted {
      run_id: run_id.clone(),
      steps: self.script.steps.len(),
    });

    if !self.script.is_supported_version() {
      warn!(
        run_id = %run_id,
        version = %self.script.version,
        supported = SUPPORTED_VERSION,
        "script_version_unsupported"
      );
    }

    let mut state = RunState::new();
    let mut outcomes = Vec::with_capacity(self.script.steps.len());
    let mut abort = None;

    let host = &self.runtime.host;
    let config = &self.runtime.config;

    for (step_index, step) in self.script.steps.iter().enumerate() {
      let kind = step.kind();
      let mut outcome = StepOutcome::new(step_index, kind, StepStatus::Completed);

      let result = match step {
        Step::Unrecognized(_) => {
          warn!(run_id = %run_id, step_index, step = kind, "step_kind_unrecognized");
          self.notify(RunEvent::StepSkipped {
            run_id: run_id.clone(),
            step_index,
            step: kind.to_string(),
          });
          outcome.status = StepStatus::Skipped;
          outcomes.push(outcome);
          continue;
        }
        Step::Capture(step) => {
          self.step_started(step_index, kind);
          capture(host, config, step_index, step).map(|document| {
            state.replace_document(document);
            outcome
          })
        }
        Step::Annotate(step) => {
          self.step_started(step_index, kind);
          annotate(state.document_mut(), host, step_index, &step.elements).map(|report| {
            outcome.warnings = report.warnings;
            outcome
          })
        }
        Step::Export(step) => {
          self.step_started(step_index, kind);
          export(state.document(), host, step_index, &step.destinations).map(|report| {
            outcome.warnings = report.warnings;
            outcome.deliveries = report.deliveries;
            outcome
          })
        }
      };

      match result {
        Ok(outcome) => {
          info!(
            run_id = %run_id,
            step_index,
            step = kind,
            warnings = outcome.warnings.len(),
            "step_completed"
          );
          self.notify(RunEvent::StepCompleted {
            run_id: run_id.clone(),
            step_index,
            step: kind.to_string(),
            warnings: outcome.warnings.len(),
          });
          outcomes.push(outcome);
        }
        Err(e) => {
          error!(run_id = %run_id, step_index, step = kind, error = %e, "step_failed");
          self.notify(RunEvent::StepFailed {
            run_id: run_id.clone(),
            step_index,
            step: kind.to_string(),
            error: e.to_string(),
          });
          outcomes.push(StepOutcome::new(step_index, kind, StepStatus::Failed));
          abort = Some(RunAbort {
            step_index,
            step: kind.to_string(),
            error: e,
          });
          break;
        }
      }
    }

    match &abort {
      None => {
        info!(run_id = %run_id, "run_completed");
        self.notify(RunEvent::RunCompleted { run_id: run_id.clone() });
      }
      Some(abort) => {
        error!(run_id = %run_id, step_index = abort.step_index, "run_aborted");
        self.notify(RunEvent::RunAborted {
          run_id: run_id.clone(),
          step_index: abort.step_index,
        });
      }
    }

    RunSummary {
      run_id,
      outcomes,
      abort,
      document: state.into_document(),
    }
  }

  fn step_started(&self, step_index: usize, kind: &str) {
    info!(run_id = %self.run_id, step_index, step = kind, "step_started");
    self.notify(RunEvent::StepStarted {
      run_id: self.run_id.clone(),
      step_index,
      step: kind.to_string(),
    });
  }

  fn notify(&self, event: RunEvent) {
    self.runtime.notifier.notify(event);
  }
}

#[cfg(test)]
mod tests {
  use macroshot_config::{AnnotateStep, CaptureStep, Destination, ExportStep, Unrecognized};
  use macroshot_host::{Host, MockScreenSource};
  use macroshot_surface::{Color, Pixels};

  use super::*;
  use crate::config::RuntimeConfig;

  fn runtime() -> WorkflowRuntime {
    let mut screen = MockScreenSource::new();
    screen
      .expect_capture_fullscreen()
      .returning(|_| Ok(Pixels::filled(16, 16, Color::WHITE)));
    WorkflowRuntime::new(RuntimeConfig::default(), Host::default().with_screen(screen))
  }

  #[test]
  fn test_empty_script_succeeds() {
    let summary = runtime().execute(&WorkflowScript::default());
    assert!(summary.is_success());
    assert!(summary.outcomes.is_empty());
    assert!(summary.document.is_none());
  }

  #[test]
  fn test_unrecognized_steps_are_skipped() {
    let script = WorkflowScript::new(vec![
      Step::Capture(CaptureStep::fullscreen()),
      Step::Unrecognized(Unrecognized::new("upload")),
      Step::Annotate(AnnotateStep::default()),
    ]);
    let summary = runtime().execute(&script);

    assert!(summary.is_success());
    let statuses: Vec<_> = summary.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
      statuses,
      vec![StepStatus::Completed, StepStatus::Skipped, StepStatus::Completed]
    );
    assert_eq!(summary.outcomes[1].step, "upload");
    assert!(summary.document.is_some());
  }

  #[test]
  fn test_export_before_capture_aborts() {
    let script = WorkflowScript::new(vec![
      Step::Export(ExportStep {
        destinations: vec![Destination::Clipboard],
      }),
      Step::Capture(CaptureStep::fullscreen()),
    ]);
    let summary = runtime().execute(&script);

    let abort = summary.abort.as_ref().unwrap();
    assert_eq!(abort.step_index, 0);
    assert_eq!(abort.step, "export");
    assert!(matches!(abort.error, RuntimeError::NoActiveDocument { step: "export" }));
    assert_eq!(summary.outcomes.len(), 1);
    assert_eq!(summary.outcomes[0].status, StepStatus::Failed);
    assert!(summary.document.is_none());
  }

  #[test]
  fn test_each_run_starts_without_a_document() {
    let runtime = runtime();
    let first = WorkflowScript::new(vec![Step::Capture(CaptureStep::fullscreen())]);
    assert!(runtime.execute(&first).is_success());

    let second = WorkflowScript::new(vec![Step::Annotate(AnnotateStep::default())]);
    let summary = runtime.execute(&second);
    assert!(matches!(
      summary.abort.map(|a| a.error),
      Some(RuntimeError::NoActiveDocument { step: "annotate" })
    ));
  }

  #[test]
  fn test_run_ids_are_unique() {
    let runtime = runtime();
    let script = WorkflowScript::default();
    let a = runtime.start(&script);
    let b = runtime.start(&script);
    assert_ne!(a.run_id(), b.run_id());
  }
}
