use super::*;

#[test]
fn defaults_are_valid_and_match_reference_values() {
    let cfg = KaraokeConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.grouping.words_per_line, 10);
    assert_eq!(cfg.transcript.max_word_duration_secs, 3.0);
    assert_eq!(cfg.layout.clip_width_px, 1200);
    assert_eq!(cfg.layout.background_color, Rgba8::rgba(0, 0, 0, 180));
    assert_eq!(cfg.preview.line_spacing_px, 20);
    assert_eq!(cfg.clip.advance_secs, 0.5);
    assert_eq!(cfg.highlight.mode, HighlightMode::Syllable);
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let cfg = KaraokeConfig::from_json_str(
        r##"{
            "grouping": { "words_per_line": 6 },
            "highlight": { "mode": "word", "weights": { "temporal": 0.5, "segment": 0.5 } },
            "layout": { "highlight_color": "#00ff00", "font_path": null }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.grouping.words_per_line, 6);
    assert_eq!(cfg.highlight.mode, HighlightMode::Word);
    assert_eq!(cfg.highlight.weights.temporal, 0.5);
    assert_eq!(cfg.layout.highlight_color, Rgba8::rgb(0, 255, 0));
    assert!(cfg.layout.font_path.is_none());
    assert_eq!(cfg.layout.font_size_px, 36.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = KaraokeConfig::from_json_str(r#"{ "grouping": { "words": 3 } }"#).unwrap_err();
    assert!(matches!(err, KaraokeError::Serde(_)));
}

#[test]
fn validation_catches_degenerate_values() {
    let mut cfg = KaraokeConfig::default();
    cfg.grouping.words_per_line = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = KaraokeConfig::default();
    cfg.layout.clip_width_px = 70_000;
    assert!(cfg.validate().is_err());

    let mut cfg = KaraokeConfig::default();
    cfg.preview.alpha = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = KaraokeConfig::default();
    cfg.highlight.weights = ProgressWeights {
        temporal: 0.0,
        segment: 0.0,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = KaraokeConfig::default();
    let json = cfg.to_json_pretty().unwrap();
    let back = KaraokeConfig::from_json_str(&json).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn from_path_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = KaraokeConfig::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("read config"));
}
