//! The annotate stage: turn element descriptions into overlays.

use macroshot_config::{ArrowElement, Element, ObfuscateElement, Rect, ShapeElement, TextElement};
use macroshot_host::Host;
use macroshot_surface::{
  ArrowOverlay, Field, FieldValue, ImageDocument, ObfuscateOverlay, Overlay, RectangleOverlay,
  StyleIssue, StyleReport, Styleable, TextOverlay, apply_obfuscate_style, apply_style,
};
use tracing::{debug, instrument, warn};

use crate::error::RuntimeError;
use crate::report::{AnnotateReport, RunWarning};

/// Place `elements` on the active document, in order.
#[instrument(name = "annotate", skip(document, host, elements), fields(elements = elements.len()))]
pub fn annotate(
  document: Option<&mut ImageDocument>,
  host: &Host,
  step_index: usize,
  elements: &[Element],
) -> Result<AnnotateReport, RuntimeError> {
  let document = document.ok_or(RuntimeError::NoActiveDocument { step: "annotate" })?;
  let mut report = AnnotateReport::default();

  for (element_index, element) in elements.iter().enumerate() {
    let mut warnings = Vec::new();
    let overlay: Overlay = match element {
      Element::Rectangle(e) => rectangle(e, element_index, &mut warnings).into(),
      Element::Arrow(e) => arrow(e, element_index, &mut warnings).into(),
      Element::Text(e) => text(e, host, element_index, &mut warnings).into(),
      Element::Obfuscate(e) => obfuscate(e, element_index, &mut warnings).into(),
      Element::Unrecognized(raw) => {
        warn!(step_index, element_index, kind = %raw.kind, "element_kind_unrecognized");
        report.warnings.push(RunWarning::UnrecognizedKind {
          index: element_index,
          kind: raw.kind.clone(),
        });
        continue;
      }
    };

    for warning in &warnings {
      log_warning(step_index, warning);
    }
    debug!(step_index, element_index, kind = overlay.kind(), "overlay_placed");
    document.add_overlay(overlay);
    report.placed += 1;
    report.warnings.extend(warnings);
  }

  Ok(report)
}

fn log_warning(step_index: usize, warning: &RunWarning) {
  match warning {
    RunWarning::Style { element_index, issue } => {
      warn!(step_index, element_index, key = issue.key().unwrap_or_default(), issue = %issue, "style_issue");
    }
    RunWarning::MissingGeometry { element_index, field } => {
      warn!(step_index, element_index, field, "element_geometry_missing");
    }
    RunWarning::UnrecognizedKind { index, kind } => {
      warn!(step_index, element_index = index, kind = %kind, "element_kind_unrecognized");
    }
  }
}

fn collect_style(report: StyleReport, element_index: usize, warnings: &mut Vec<RunWarning>) {
  warnings.extend(
    report
      .issues
      .into_iter()
      .map(|issue| RunWarning::Style { element_index, issue }),
  );
}

fn require<T>(value: Option<T>, field: &'static str, element_index: usize, warnings: &mut Vec<RunWarning>) -> Option<T> {
  if value.is_none() {
    warnings.push(RunWarning::MissingGeometry { element_index, field });
  }
  value
}

fn rectangle(e: &ShapeElement, element_index: usize, warnings: &mut Vec<RunWarning>) -> RectangleOverlay {
  let mut overlay = RectangleOverlay::default();
  if let Some(bounds) = require(e.bounds, "bounds", element_index, warnings) {
    overlay.bounds = Rect::from(bounds);
  }
  if let Some(style) = &e.style {
    collect_style(apply_style(&mut overlay, style), element_index, warnings);
  }
  overlay
}

fn arrow(e: &ArrowElement, element_index: usize, warnings: &mut Vec<RunWarning>) -> ArrowOverlay {
  let mut overlay = ArrowOverlay::default();
  let from = require(e.from, "from", element_index, warnings);
  let to = require(e.to, "to", element_index, warnings);
  // A single endpoint places nothing.
  if let (Some(from), Some(to)) = (from, to) {
    overlay = ArrowOverlay::between(from, to);
  }
  if let Some(style) = &e.style {
    collect_style(apply_style(&mut overlay, style), element_index, warnings);
  }
  overlay
}

fn text(e: &TextElement, host: &Host, element_index: usize, warnings: &mut Vec<RunWarning>) -> TextOverlay {
  let mut overlay = TextOverlay::default();
  if let Some(position) = require(e.position, "position", element_index, warnings) {
    overlay.bounds = Rect::new(position.x, position.y, 0, 0);
  }
  overlay.content = e.content.clone().unwrap_or_default();
  if let Some(style) = &e.style {
    collect_style(apply_style(&mut overlay, style), element_index, warnings);
  }
  let measured = host.renderer.measure_text(&overlay.content, &overlay.font);
  overlay.fit_to(measured);
  overlay
}

fn obfuscate(e: &ObfuscateElement, element_index: usize, warnings: &mut Vec<RunWarning>) -> ObfuscateOverlay {
  let mut overlay = ObfuscateOverlay::default();
  if let Some(bounds) = require(e.bounds, "bounds", element_index, warnings) {
    overlay.bounds = Rect::from(bounds);
  }
  if let Some(pixel_size) = e.pixel_size
    && let Err(error) = overlay.apply_field(Field::PixelSize, FieldValue::Integer(pixel_size))
  {
    warnings.push(RunWarning::Style {
      element_index,
      issue: StyleIssue::ApplyFailed {
        key: "pixel_size".to_string(),
        field: Field::PixelSize,
        error,
      },
    });
  }
  let report = apply_obfuscate_style(&mut overlay, e.style.as_ref(), e.method.as_deref());
  collect_style(report, element_index, warnings);
  overlay
}

#[cfg(test)]
mod tests {
  use chrono::Local;
  use macroshot_config::{Bounds, Point, StyleSet, Unrecognized};
  use macroshot_host::MockRenderer;
  use macroshot_surface::{Color, ObfuscatePreset, Pixels, Size};

  use super::*;

  fn document() -> ImageDocument {
    ImageDocument::new(Pixels::filled(200, 200, Color::WHITE), Local::now())
  }

  #[test]
  fn test_requires_document() {
    let err = annotate(None, &Host::default(), 1, &[]).unwrap_err();
    assert!(matches!(err, RuntimeError::NoActiveDocument { step: "annotate" }));
  }

  #[test]
  fn test_places_in_order_and_skips_unknown() {
    let mut doc = document();
    let elements = vec![
      Element::Rectangle(ShapeElement {
        bounds: Some(Bounds { x: 1, y: 2, w: 30, h: 40 }),
        style: None,
      }),
      Element::Unrecognized(Unrecognized::new("sparkle")),
      Element::Arrow(ArrowElement {
        from: Some(Point { x: 10, y: 10 }),
        to: Some(Point { x: 5, y: 50 }),
        style: None,
      }),
    ];

    let report = annotate(Some(&mut doc), &Host::default(), 1, &elements).unwrap();
    assert_eq!(report.placed, 2);
    assert_eq!(
      report.warnings,
      vec![RunWarning::UnrecognizedKind {
        index: 1,
        kind: "sparkle".to_string()
      }]
    );

    let overlays = doc.overlays();
    assert_eq!(overlays[0].bounds(), Rect::new(1, 2, 30, 40));
    let Overlay::Arrow(arrow) = &overlays[1] else {
      panic!("expected arrow");
    };
    assert_eq!(arrow.start, Point { x: 10, y: 10 });
    assert_eq!(arrow.extent, Point { x: -5, y: 40 });
  }

  #[test]
  fn test_text_fits_after_style() {
    let mut renderer = MockRenderer::new();
    renderer
      .expect_measure_text()
      .withf(|text, font| text == "Step 1" && font.size == 20.0 && font.bold)
      .times(1)
      .returning(|_, _| Size::new(60, 24));
    let host = Host::default().with_renderer(renderer);

    let mut doc = document();
    let elements = vec![Element::Text(TextElement {
      position: Some(Point { x: 15, y: 25 }),
      content: Some("Step 1".to_string()),
      style: Some(
        StyleSet::new()
          .with("font_size", 20_i64)
          .with("font_bold", true)
          .with("line_thickness", 1_i64),
      ),
    })];

    annotate(Some(&mut doc), &host, 0, &elements).unwrap();
    let Overlay::Text(text) = &doc.overlays()[0] else {
      panic!("expected text");
    };
    assert_eq!(text.bounds, Rect::new(15, 25, 66, 30));
  }

  #[test]
  fn test_missing_geometry_keeps_defaults() {
    let mut doc = document();
    let elements = vec![Element::Text(TextElement::default())];
    let report = annotate(Some(&mut doc), &Host::default(), 0, &elements).unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!(
      report.warnings,
      vec![RunWarning::MissingGeometry {
        element_index: 0,
        field: "position"
      }]
    );
    let Overlay::Text(text) = &doc.overlays()[0] else {
      panic!("expected text");
    };
    assert_eq!((text.bounds.x, text.bounds.y), (0, 0));
    assert_eq!(text.content, "");
  }

  #[test]
  fn test_arrow_needs_both_endpoints() {
    let mut doc = document();
    let elements = vec![Element::Arrow(ArrowElement {
      from: Some(Point { x: 40, y: 60 }),
      to: None,
      style: None,
    })];
    let report = annotate(Some(&mut doc), &Host::default(), 0, &elements).unwrap();

    assert_eq!(report.placed, 1);
    assert_eq!(
      report.warnings,
      vec![RunWarning::MissingGeometry {
        element_index: 0,
        field: "to"
      }]
    );
    let Overlay::Arrow(arrow) = &doc.overlays()[0] else {
      panic!("expected arrow");
    };
    assert_eq!(arrow.start, Point { x: 0, y: 0 });
    assert_eq!(arrow.extent, Point { x: 0, y: 0 });
  }

  #[test]
  fn test_style_issues_are_reported_per_element() {
    let mut doc = document();
    let elements = vec![Element::Rectangle(ShapeElement {
      bounds: Some(Bounds { x: 0, y: 0, w: 5, h: 5 }),
      style: Some(StyleSet::new().with("line_color", "not-a-color").with("glow", 3_i64)),
    })];

    let report = annotate(Some(&mut doc), &Host::default(), 0, &elements).unwrap();
    assert_eq!(report.warnings.len(), 2);
    assert!(matches!(
      &report.warnings[0],
      RunWarning::Style {
        element_index: 0,
        issue: StyleIssue::ColorFallback { .. }
      }
    ));
    let Overlay::Rectangle(rect) = &doc.overlays()[0] else {
      panic!("expected rectangle");
    };
    assert_eq!(rect.line.color, Color::RED);
  }

  #[test]
  fn test_obfuscate_element_pixel_size_then_style() {
    let mut doc = document();
    let elements = vec![
      Element::Obfuscate(ObfuscateElement {
        bounds: Some(Bounds { x: 0, y: 0, w: 10, h: 10 }),
        method: None,
        pixel_size: Some(9),
        style: None,
      }),
      Element::Obfuscate(ObfuscateElement {
        bounds: Some(Bounds { x: 0, y: 0, w: 10, h: 10 }),
        method: None,
        pixel_size: Some(9),
        style: Some(StyleSet::new().with("pixel_size", 14_i64)),
      }),
      Element::Obfuscate(ObfuscateElement {
        bounds: Some(Bounds { x: 0, y: 0, w: 10, h: 10 }),
        method: Some("blur".to_string()),
        pixel_size: None,
        style: None,
      }),
    ];

    let report = annotate(Some(&mut doc), &Host::default(), 0, &elements).unwrap();
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);

    let presets: Vec<(ObfuscatePreset, i32)> = doc
      .overlays()
      .iter()
      .map(|o| match o {
        Overlay::Obfuscate(o) => (o.preset, o.pixel_size),
        other => panic!("unexpected {}", other.kind()),
      })
      .collect();
    assert_eq!(
      presets,
      vec![
        (ObfuscatePreset::Pixelate, 9),
        (ObfuscatePreset::Pixelate, 14),
        (ObfuscatePreset::Blur, 5),
      ]
    );
  }
}
