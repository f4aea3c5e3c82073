//! Per-run mutable state.

use macroshot_surface::ImageDocument;

/// What a run carries from one step to the next.
///
/// A fresh state holds no document. Each successful capture replaces it.
#[derive(Debug, Default)]
pub struct RunState {
  document: Option<ImageDocument>,
}

impl RunState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn document(&self) -> Option<&ImageDocument> {
    self.document.as_ref()
  }

  pub fn document_mut(&mut self) -> Option<&mut ImageDocument> {
    self.document.as_mut()
  }

  /// Install a freshly captured document, discarding the previous one.
  pub fn replace_document(&mut self, document: ImageDocument) {
    self.document = Some(document);
  }

  pub fn into_document(self) -> Option<ImageDocument> {
    self.document
  }
}
