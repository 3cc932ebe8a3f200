use super::*;

#[test]
fn metrics_only_engine_estimates_advance() {
    let mut engine = TextEngine::new(&FontSource::metrics_only());
    assert!(engine.font_data().is_none());
    assert!(engine.layout("hola", 20.0, Rgba8::rgb(255, 255, 255)).is_none());

    let w = engine.measure("hola", 20.0);
    assert!((w - 4.0 * 20.0 * FALLBACK_ADVANCE_EM).abs() < 1e-4);
    assert!(engine.measure("hola mundo", 20.0) > w);
}

#[test]
fn garbage_font_bytes_do_not_panic() {
    let source = FontSource::from_bytes(vec![0u8; 64], "garbage");
    assert!(source.has_outlines());
    let mut engine = TextEngine::new(&source);
    assert!(engine.font_data().is_none());
    assert!(engine.layout("x", 10.0, Rgba8::default()).is_none());
    assert!(engine.measure("x", 10.0) > 0.0);
}

#[test]
fn missing_font_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.ttf");
    let source = FontSource::resolve(Some(&path));
    assert_ne!(source.origin(), path.display().to_string());

    let mut engine = TextEngine::new(&source);
    let w = engine.measure("karaoke", 36.0);
    assert!(w.is_finite() && w > 0.0);
}
