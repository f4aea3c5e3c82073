//! The export stage: flatten the active document and deliver it.

use std::fs;
use std::path::Path;

use macroshot_config::{Destination, FileDestination};
use macroshot_host::Host;
use macroshot_surface::{ImageDocument, Pixels};
use tracing::{info, instrument, warn};

use crate::error::RuntimeError;
use crate::report::{Delivery, ExportReport, RunWarning};
use crate::template::expand_path;

/// Deliver the active document to each destination, in order.
///
/// The document is flattened at most once per call, on the first
/// destination that needs pixels.
#[instrument(name = "export", skip(document, host, destinations), fields(destinations = destinations.len()))]
pub fn export(
  document: Option<&ImageDocument>,
  host: &Host,
  step_index: usize,
  destinations: &[Destination],
) -> Result<ExportReport, RuntimeError> {
  let document = document.ok_or(RuntimeError::NoActiveDocument { step: "export" })?;
  let mut report = ExportReport::default();
  let mut flattened: Option<Pixels> = None;

  for (index, destination) in destinations.iter().enumerate() {
    match destination {
      Destination::File(file) => {
        let path = save_file(document, host, step_index, file, &mut flattened)?;
        info!(step_index, path = %path.display(), "export_file_written");
        report.deliveries.push(Delivery::File(path));
      }
      Destination::Clipboard => {
        let pixels = flatten(document, host, &mut flattened)?;
        host.clipboard.set_image(pixels)?;
        info!(step_index, "export_clipboard_set");
        report.deliveries.push(Delivery::Clipboard);
      }
      Destination::Unrecognized(raw) => {
        warn!(step_index, index, kind = %raw.kind, "destination_kind_unrecognized");
        report.warnings.push(RunWarning::UnrecognizedKind {
          index,
          kind: raw.kind.clone(),
        });
      }
    }
  }

  Ok(report)
}

fn save_file(
  document: &ImageDocument,
  host: &Host,
  step_index: usize,
  file: &FileDestination,
  flattened: &mut Option<Pixels>,
) -> Result<std::path::PathBuf, RuntimeError> {
  let template = file.path.as_deref().ok_or(RuntimeError::MissingField {
    step_index,
    field: "path",
  })?;
  let path = expand_path(template, host.clock.now());
  create_parent(&path)?;

  let pixels = flatten(document, host, flattened)?;
  host.codec.save(pixels, &path)?;
  Ok(path)
}

fn create_parent(path: &Path) -> Result<(), RuntimeError> {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
      fs::create_dir_all(parent).map_err(|source| RuntimeError::CreateDirectory {
        path: parent.to_path_buf(),
        source,
      })
    }
    _ => Ok(()),
  }
}

fn flatten<'a>(
  document: &ImageDocument,
  host: &Host,
  flattened: &'a mut Option<Pixels>,
) -> Result<&'a Pixels, RuntimeError> {
  let pixels = match flattened.take() {
    Some(pixels) => pixels,
    None => host.renderer.render(document)?,
  };
  Ok(flattened.insert(pixels))
}
