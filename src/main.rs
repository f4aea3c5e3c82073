use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use macroshot_config::{CaptureMode, Step, WorkflowScript};
use macroshot_host::Host;
use macroshot_runtime::{RuntimeConfig, RuntimeError, WorkflowRuntime};

/// Macroshot - capture, annotate and export screenshots from JSON macros
#[derive(Parser)]
#[command(name = "macroshot")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a workflow script
  Run {
    /// Path to the workflow script (JSON)
    script: PathBuf,

    #[command(flatten)]
    overrides: ConfigArgs,
  },

  /// Parse a workflow script and print it normalized
  Check {
    /// Path to the workflow script (JSON)
    script: PathBuf,
  },
}

#[derive(Args)]
struct ConfigArgs {
  /// Path to the runtime config (default: <config dir>/macroshot/config.json)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Auto-crop screen captures that do not say otherwise
  #[arg(long, conflicts_with = "no_autocrop")]
  autocrop: bool,

  /// Never auto-crop unless a capture step asks for it
  #[arg(long)]
  no_autocrop: bool,

  /// Background color difference used when auto-cropping
  #[arg(long, value_name = "N")]
  autocrop_difference: Option<i32>,
}

fn main() -> Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("macroshot=info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Run { script, overrides }) => run(&script, &overrides),
    Some(Commands::Check { script }) => check(&script),
    None => {
      println!("macroshot - use --help to see available commands");
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn run(script_path: &Path, overrides: &ConfigArgs) -> Result<ExitCode> {
  let config = load_config(overrides)?;
  let script = WorkflowScript::load(script_path)
    .with_context(|| format!("failed to load script: {}", script_path.display()))?;

  eprintln!("Loaded script with {} steps", script.steps.len());

  let runtime = WorkflowRuntime::new(config, Host::default());
  let summary = runtime.execute(&script);

  for path in summary.written_files() {
    println!("{}", path.display());
  }
  for (step_index, warning) in summary.warnings() {
    eprintln!("warning: step {}: {}", step_index, warning);
  }

  match &summary.abort {
    None => {
      eprintln!("Run completed: {}", summary.run_id);
      Ok(ExitCode::SUCCESS)
    }
    Some(abort) => {
      eprintln!(
        "Run {} aborted at step {} ({}): {}",
        summary.run_id, abort.step_index, abort.step, abort.error
      );
      if let Some(hint) = script.steps.get(abort.step_index).and_then(|step| abort_hint(step, &abort.error)) {
        eprintln!("hint: {}", hint);
      }
      Ok(ExitCode::FAILURE)
    }
  }
}

/// Advice for failures the stock binary cannot avoid.
fn abort_hint(step: &Step, error: &RuntimeError) -> Option<&'static str> {
  match (step, error) {
    (Step::Capture(capture), RuntimeError::CaptureFailed { message })
      if matches!(capture.mode, CaptureMode::Fullscreen | CaptureMode::Region)
        && message.starts_with("screen capture is unavailable") =>
    {
      Some(
        "this build has no screen capture backend; use a \"type\": \"file\" capture \
         or embed macroshot with a custom ScreenSource",
      )
    }
    _ => None,
  }
}

fn check(script_path: &Path) -> Result<ExitCode> {
  let script = WorkflowScript::load(script_path)
    .with_context(|| format!("failed to load script: {}", script_path.display()))?;

  println!("{}", script.to_json_pretty()?);

  for (path, kind) in script.unrecognized_kinds() {
    eprintln!("unrecognized kind '{}' at {}", kind, path);
  }
  if !script.is_supported_version() {
    eprintln!(
      "script version {} differs from supported version {}",
      script.version,
      macroshot_config::SUPPORTED_VERSION
    );
  }

  Ok(ExitCode::SUCCESS)
}

/// Read the runtime config and apply command-line overrides.
///
/// An explicit `--config` must exist; the default location may be absent.
fn load_config(overrides: &ConfigArgs) -> Result<RuntimeConfig> {
  let mut config = match &overrides.config {
    Some(path) => read_config(path)?,
    None => match default_config_path() {
      Some(path) => match fs::read_to_string(&path) {
        Ok(content) => parse_config(&content, &path)?,
        Err(e) if e.kind() == ErrorKind::NotFound => RuntimeConfig::default(),
        Err(e) => {
          return Err(e).with_context(|| format!("failed to read config file: {}", path.display()));
        }
      },
      None => RuntimeConfig::default(),
    },
  };

  if overrides.autocrop {
    config.auto_crop = true;
  }
  if overrides.no_autocrop {
    config.auto_crop = false;
  }
  if let Some(difference) = overrides.autocrop_difference {
    config.auto_crop_difference = difference;
  }
  tracing::debug!(
    auto_crop = config.auto_crop,
    auto_crop_difference = config.auto_crop_difference,
    "config_resolved"
  );
  Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|dir| dir.join("macroshot").join("config.json"))
}

fn read_config(path: &Path) -> Result<RuntimeConfig> {
  let content =
    fs::read_to_string(path).with_context(|| format!("failed to read config file: {}", path.display()))?;
  parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<RuntimeConfig> {
  serde_json::from_str(content).with_context(|| format!("failed to parse config file: {}", path.display()))
}
