use chrono::{Local, TimeZone};
use macroshot_host::{Clock, FixedClock, Host, HostError};
use macroshot_surface::{Color, ImageDocument, ObfuscateOverlay, Pixels, Rect, RectangleOverlay};

#[test]
fn test_default_host_renders_and_saves() {
  let host = Host::default();
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("flat.png");

  let mut doc = ImageDocument::new(Pixels::filled(32, 32, Color::WHITE), host.clock.now());
  doc.add_overlay(RectangleOverlay {
    bounds: Rect::new(4, 4, 10, 10),
    ..RectangleOverlay::default()
  });
  doc.add_overlay(ObfuscateOverlay {
    bounds: Rect::new(20, 20, 8, 8),
    ..ObfuscateOverlay::default()
  });

  let flat = host.renderer.render(&doc).unwrap();
  host.codec.save(&flat, &path).unwrap();

  let loaded = host.codec.load(&path).unwrap();
  assert_eq!((loaded.width(), loaded.height()), (32, 32));
  assert_eq!(loaded.get(4, 4), Some(Color::RED));
  assert_eq!(loaded.get(0, 0), Some(Color::WHITE));
}

#[test]
fn test_default_host_is_headless() {
  let host = Host::default();
  let err = host.screen.capture_fullscreen(false).unwrap_err();
  assert!(matches!(err, HostError::Unavailable { what: "screen capture", .. }));
}

#[test]
fn test_crop_detector_on_capture_with_border() {
  let host = Host::default();
  let mut pixels = Pixels::filled(20, 10, Color::BLACK);
  for y in 2..8 {
    for x in 5..15 {
      pixels.set(x, y, Color::rgb(200, 200, 0));
    }
  }
  assert_eq!(host.crop.find_crop_rect(&pixels, 10), Rect::new(5, 2, 10, 6));
}

#[test]
fn test_fixed_clock() {
  let instant = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
  let host = Host::default().with_clock(FixedClock(instant));
  assert_eq!(host.clock.now(), instant);
}
