//! Workflow runtime.

use std::path::Path;
use std::sync::Arc;

use macroshot_config::WorkflowScript;
use macroshot_host::Host;

use crate::config::RuntimeConfig;
use crate::error::RunError;
use crate::events::{NoopNotifier, RunNotifier};
use crate::execution::{RunExecution, RunSummary};

/// Executes workflow scripts against a [`Host`].
///
/// The runtime holds no per-run state, so one instance can run any number of
/// scripts one after another.
#[derive(Clone)]
pub struct WorkflowRuntime {
  pub(crate) config: RuntimeConfig,
  pub(crate) host: Host,
  pub(crate) notifier: Arc<dyn RunNotifier>,
}

impl Default for WorkflowRuntime {
  fn default() -> Self {
    Self::new(RuntimeConfig::default(), Host::default())
  }
}

impl WorkflowRuntime {
  pub fn new(config: RuntimeConfig, host: Host) -> Self {
    Self {
      config,
      host,
      notifier: Arc::new(NoopNotifier),
    }
  }

  pub fn with_notifier(mut self, notifier: impl RunNotifier + 'static) -> Self {
    self.notifier = Arc::new(notifier);
    self
  }

  pub fn config(&self) -> &RuntimeConfig {
    &self.config
  }

  pub fn host(&self) -> &Host {
    &self.host
  }

  /// Prepare a run of `script`.
  ///
  /// Returns a `RunExecution` handle. Call `.wait()` to run it.
  pub fn start<'a>(&'a self, script: &'a WorkflowScript) -> RunExecution<'a> {
    let run_id = uuid::Uuid::new_v4().to_string();
    RunExecution::new(self, script, run_id)
  }

  /// Run `script` to completion or to its first failing step.
  pub fn execute(&self, script: &WorkflowScript) -> RunSummary {
    self.start(script).wait()
  }
}

/// Load the script at `path` and execute it.
///
/// Schema errors are returned before any step runs.
pub fn run_script_file(runtime: &WorkflowRuntime, path: impl AsRef<Path>) -> Result<RunSummary, RunError> {
  let script = WorkflowScript::load(path)?;
  Ok(runtime.execute(&script))
}
