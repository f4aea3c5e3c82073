//! Macroshot Config
//!
//! This crate contains the serializable workflow script types for macroshot.
//! A script is an ordered list of `capture`, `annotate` and `export` steps
//! that the runtime executes against a single image document.
//!
//! Scripts are loaded from JSON:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "workflow": [
//!     { "step": "capture", "type": "region", "area": { "x": 0, "y": 0, "width": 800, "height": 600 } },
//!     { "step": "annotate", "elements": [
//!       { "type": "rectangle", "bounds": { "x": 10, "y": 10, "w": 200, "h": 100 },
//!         "style": { "line_color": "#FF0000", "line_thickness": 3 } }
//!     ] },
//!     { "step": "export", "destinations": [ { "type": "file", "path": "out/shot_{timestamp}.png" } ] }
//!   ]
//! }
//! ```
//!
//! Decoding is lenient about kinds and strict about shapes: a step, element
//! or destination with an unknown discriminator decodes into an
//! `Unrecognized` variant that keeps its raw fields, while a malformed field
//! of a known kind fails with [`ScriptError::MalformedScript`] naming the
//! offending path.

mod decode;
mod destination;
mod element;
mod error;
mod geometry;
mod script;
mod step;
mod style;
mod tagged;

pub use destination::{Destination, FileDestination};
pub use element::{ArrowElement, Element, ObfuscateElement, ShapeElement, TextElement};
pub use error::ScriptError;
pub use geometry::{Bounds, Point, Rect};
pub use script::{SUPPORTED_VERSION, WorkflowScript};
pub use step::{AnnotateStep, CaptureMode, CaptureOptions, CaptureStep, ExportStep, Step};
pub use style::{StyleSet, StyleValue};
pub use tagged::Unrecognized;
