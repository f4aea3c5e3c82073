use macroshot_config::StyleSet;
use macroshot_surface::{
  ArrowOverlay, Color, Field, ObfuscateOverlay, ObfuscatePreset, Point, RectangleOverlay,
  StyleIssue, Styleable, TextOverlay, apply_obfuscate_style, apply_style,
};
use serde_json::json;

fn style(value: serde_json::Value) -> StyleSet {
  serde_json::from_value(value).unwrap()
}

#[test]
fn test_script_style_on_every_kind() {
  let style = style(json!({
    "line_color": "#0000FF",
    "line_thickness": "4",
    "shadow": 0
  }));

  let mut rect = RectangleOverlay::default();
  let mut arrow = ArrowOverlay::between(Point { x: 0, y: 0 }, Point { x: 10, y: 10 });
  let mut text = TextOverlay::new(Point { x: 1, y: 1 }, "hi");
  let mut obfuscate = ObfuscateOverlay::default();

  assert!(apply_style(&mut rect, &style).is_clean());
  assert!(apply_style(&mut arrow, &style).is_clean());
  assert!(apply_style(&mut text, &style).is_clean());
  assert!(apply_obfuscate_style(&mut obfuscate, Some(&style), None).is_clean());

  for line in [rect.line, arrow.line, text.line] {
    assert_eq!(line.color, Color::rgb(0, 0, 255));
    assert_eq!(line.thickness, 4);
    assert!(!line.shadow);
  }
  assert_eq!(obfuscate.line_color, Color::rgb(0, 0, 255));
  assert_eq!(obfuscate.line_thickness, 4);
  assert_eq!(obfuscate.preset, ObfuscatePreset::Pixelate);
}

#[test]
fn test_registries_are_static_per_kind() {
  let fields: Vec<Field> = TextOverlay::capabilities().fields().collect();
  assert!(fields.contains(&Field::FontSize));
  assert!(!RectangleOverlay::capabilities().contains(Field::FontSize));
  assert!(std::ptr::eq(
    RectangleOverlay::capabilities(),
    RectangleOverlay::capabilities()
  ));
}

#[test]
fn test_highlight_color_is_known_but_unsupported() {
  let mut rect = RectangleOverlay::default();
  let report = apply_style(&mut rect, &style(json!({ "highlight_color": "yellow" })));
  assert_eq!(
    report.issues,
    vec![StyleIssue::UnsupportedField {
      key: "highlight_color".to_string(),
      field: Field::HighlightColor,
    }]
  );
}

#[test]
fn test_non_string_color_falls_back() {
  let mut text = TextOverlay::default();
  let report = apply_style(&mut text, &style(json!({ "fill_color": 16711680 })));
  assert_eq!(text.line.fill, Color::RED);
  assert!(matches!(report.issues[0], StyleIssue::ColorFallback { .. }));
}
