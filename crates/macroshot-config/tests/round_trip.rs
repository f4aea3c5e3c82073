use macroshot_config::{
  Bounds, CaptureStep, Destination, Element, ExportStep, ObfuscateElement, Rect, ScriptError,
  Step, StyleSet, WorkflowScript,
};

const FULL_SCRIPT: &str = r##"{
  "version": "1.0",
  "workflow": [
    {
      "step": "capture",
      "type": "region",
      "area": { "x": 0, "y": 0, "width": 640, "height": 480 },
      "options": { "show_cursor": true, "delay_ms": 100 },
      "autocrop": false
    },
    {
      "step": "annotate",
      "elements": [
        { "type": "rectangle", "bounds": { "x": 10, "y": 10, "w": 100, "h": 50 },
          "style": { "line_color": "#00FF00", "line_thickness": 3, "shadow": false } },
        { "type": "arrow", "from": { "x": 0, "y": 0 }, "to": { "x": 40, "y": -20 } },
        { "type": "text", "position": { "x": 5, "y": 5 }, "content": "look here",
          "style": { "font_size": 14.5, "font_bold": true } },
        { "type": "obfuscate", "bounds": { "x": 200, "y": 200, "w": 80, "h": 20 },
          "style": { "blur_radius": 6 } },
        { "type": "sparkle", "intensity": 3 }
      ]
    },
    {
      "step": "export",
      "destinations": [
        { "type": "file", "path": "out/shot_{timestamp}.png", "overwrite": true },
        { "type": "clipboard" },
        { "type": "imgur", "album": "team" }
      ]
    },
    { "step": "upload", "url": "https://example.com/hook" }
  ]
}"##;

#[test]
fn test_full_script_round_trips() {
  let script = WorkflowScript::from_json(FULL_SCRIPT).unwrap();
  assert_eq!(script.steps.len(), 4);

  let first = script.to_json().unwrap();
  let reparsed = WorkflowScript::from_json(&first).unwrap();
  assert_eq!(reparsed, script);
  assert_eq!(reparsed.to_json().unwrap(), first);
}

#[test]
fn test_unrecognized_kinds_are_reported_with_paths() {
  let script = WorkflowScript::from_json(FULL_SCRIPT).unwrap();
  let found = script.unrecognized_kinds();
  assert_eq!(
    found,
    vec![
      ("$.workflow[1].elements[4]".to_string(), "sparkle".to_string()),
      ("$.workflow[2].destinations[2]".to_string(), "imgur".to_string()),
      ("$.workflow[3]".to_string(), "upload".to_string()),
    ]
  );
}

#[test]
fn test_unrecognized_fields_survive_verbatim() {
  let script = WorkflowScript::from_json(FULL_SCRIPT).unwrap();
  let value = script.to_value().unwrap();
  assert_eq!(value["workflow"][3]["url"], "https://example.com/hook");
  assert_eq!(value["workflow"][1]["elements"][4]["intensity"], 3);
  assert_eq!(value["workflow"][2]["destinations"][2]["album"], "team");
}

#[test]
fn test_built_script_round_trips() {
  let script = WorkflowScript::new(vec![
    Step::Capture(CaptureStep::region(Rect {
      x: 1,
      y: 2,
      width: 3,
      height: 4,
    })),
    Step::Annotate(macroshot_config::AnnotateStep {
      elements: vec![Element::Obfuscate(ObfuscateElement {
        bounds: Some(Bounds { x: 0, y: 0, w: 8, h: 8 }),
        method: Some("pixelate".to_string()),
        pixel_size: Some(4),
        style: Some(StyleSet::new().with("line_thickness", 1_i64)),
      })],
    }),
    Step::Export(ExportStep {
      destinations: vec![Destination::file("a.png"), Destination::Clipboard],
    }),
  ]);

  let json = script.to_json().unwrap();
  assert!(!json.contains("null"));
  assert_eq!(WorkflowScript::from_json(&json).unwrap(), script);
}

#[test]
fn test_malformed_nested_field_cites_path() {
  let json = r#"{
    "version": "1.0",
    "workflow": [
      { "step": "capture", "type": "fullscreen" },
      { "step": "annotate", "elements": [
        { "type": "text", "content": "ok" },
        { "type": "rectangle", "bounds": { "x": 0, "y": 0, "w": 1 } }
      ] }
    ]
  }"#;

  let err = WorkflowScript::from_json(json).unwrap_err();
  assert!(matches!(err, ScriptError::MalformedScript { .. }));
  assert_eq!(err.path(), Some("$.workflow[1].elements[1].bounds"));
}

#[test]
fn test_save_and_load() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("macro.json");

  let script = WorkflowScript::from_json(FULL_SCRIPT).unwrap();
  script.save(&path).unwrap();

  let loaded = WorkflowScript::load(&path).unwrap();
  assert_eq!(loaded, script);
}

#[test]
fn test_load_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let err = WorkflowScript::load(dir.path().join("absent.json")).unwrap_err();
  assert!(matches!(err, ScriptError::Io { .. }));
  assert!(err.path().is_none());
}

#[test]
fn test_null_style_values_are_ignored() {
  let json = r##"{
    "version": "1.0",
    "workflow": [
      { "step": "annotate", "elements": [
        { "type": "rectangle", "style": { "line_color": null, "line_thickness": 4 } }
      ] }
    ]
  }"##;

  let script = WorkflowScript::from_json(json).unwrap();
  let Step::Annotate(annotate) = &script.steps[0] else {
    panic!("expected annotate");
  };
  let style = annotate.elements[0].style().unwrap();
  assert_eq!(style.keys().collect::<Vec<_>>(), vec!["line_thickness"]);

  let written = script.to_json().unwrap();
  assert!(!written.contains("line_color"));
  assert!(!written.contains("null"));
}
