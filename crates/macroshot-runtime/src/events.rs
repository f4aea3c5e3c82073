//! Run events and notifiers for observability.
//!
//! The driver emits an event at every step boundary so callers can show
//! progress or keep an audit trail without parsing logs.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

/// Events emitted while a script runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEvent {
  RunStarted { run_id: String, steps: usize },

  StepStarted {
    run_id: String,
    step_index: usize,
    step: String,
  },

  StepCompleted {
    run_id: String,
    step_index: usize,
    step: String,
    warnings: usize,
  },

  /// The step kind is not known to this version and was not executed.
  StepSkipped {
    run_id: String,
    step_index: usize,
    step: String,
  },

  StepFailed {
    run_id: String,
    step_index: usize,
    step: String,
    error: String,
  },

  RunCompleted { run_id: String },

  /// A step failed and the remaining steps were not run.
  RunAborted { run_id: String, step_index: usize },
}

/// Receives run events.
pub trait RunNotifier: Send + Sync {
  fn notify(&self, event: RunEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl RunNotifier for NoopNotifier {
  fn notify(&self, _event: RunEvent) {}
}

/// Forwards events to a channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  sender: mpsc::Sender<RunEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::Sender<RunEvent>) -> Self {
    Self { sender }
  }
}

impl RunNotifier for ChannelNotifier {
  fn notify(&self, event: RunEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
