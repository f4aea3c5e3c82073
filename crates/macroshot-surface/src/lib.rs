//! Macroshot Surface
//!
//! The in-memory side of a macro run: pixel buffers, the [`ImageDocument`]
//! a run captures into, the annotation overlays placed on it, and the
//! machinery that lets a declarative style set drive overlay fields.
//!
//! # Style mapping
//!
//! ```text
//! StyleSet { "line_color": "#00FF00", "shadow": 0 }
//!   └── Field::resolve          normalized key → catalogue field
//!       └── Styleable::exposes  does this overlay accept it right now?
//!           └── coerce          raw value → FieldValue of the field's kind
//!               └── setter      from the overlay's CapabilityRegistry
//! ```
//!
//! Each overlay kind builds its [`CapabilityRegistry`] once. Problems met on
//! the way (unknown keys, unsupported fields, bad colors) are collected in a
//! [`StyleReport`] and never abort the application.

mod coerce;
mod color;
mod document;
mod field;
mod geometry;
mod mapper;
pub mod overlay;
mod pixels;
mod registry;

pub use color::Color;
pub use document::ImageDocument;
pub use field::{Field, FieldError, FieldKind, FieldValue, normalize_key};
pub use geometry::{Point, Rect, Size};
pub use mapper::{StyleIssue, StyleReport, apply_obfuscate_style, apply_style, select_obfuscate_preset};
pub use overlay::{
  ArrowOverlay, FontSpec, LineStyle, ObfuscateOverlay, ObfuscatePreset, Overlay, RectangleOverlay,
  TextOverlay,
};
pub use pixels::Pixels;
pub use registry::{CapabilityRegistry, Setter, Styleable};
