//! Step interpreter for macroshot workflow scripts.
//!
//! # Architecture
//!
//! ```text
//! WorkflowRuntime
//! ├── new(config, host)
//! ├── start(script) -> RunExecution
//! └── execute(script) -> RunSummary
//!
//! RunExecution
//! └── wait() - runs capture / annotate / export in order against a fresh RunState
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use macroshot_runtime::{RuntimeConfig, WorkflowRuntime, run_script_file};
//!
//! let runtime = WorkflowRuntime::new(RuntimeConfig::default(), Host::default());
//! let summary = run_script_file(&runtime, "macro.json")?;
//! if let Some(abort) = &summary.abort {
//!     eprintln!("step {} failed: {}", abort.step_index, abort.error);
//! }
//! ```

mod annotate;
mod capture;
mod config;
mod error;
mod events;
mod execution;
mod export;
mod report;
mod runtime;
mod state;
mod template;

pub use annotate::annotate;
pub use capture::capture;
pub use config::RuntimeConfig;
pub use error::{RunError, RuntimeError};
pub use events::{ChannelNotifier, NoopNotifier, RunEvent, RunNotifier};
pub use execution::{RunAbort, RunExecution, RunSummary};
pub use export::export;
pub use report::{AnnotateReport, Delivery, ExportReport, RunWarning, StepOutcome, StepStatus};
pub use runtime::{WorkflowRuntime, run_script_file};
pub use state::RunState;
pub use template::{TIMESTAMP_FORMAT, TIMESTAMP_PLACEHOLDER, expand_path};
