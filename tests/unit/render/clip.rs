use super::*;
use crate::{render::text::FontSource, timeline::model::WordSegment};

fn line_at(start: f64, end: f64) -> LyricLine {
    LyricLine::from_words("la la", vec![WordSegment::new("la", start, end)]).unwrap()
}

#[test]
fn clip_opens_before_the_line_and_closes_after() {
    let cfg = KaraokeConfig::default();
    let clip = KaraokeClip::new(line_at(10.0, 12.0), None, &cfg);
    assert_eq!(clip.start, 9.5);
    assert_eq!(clip.advance, 0.5);
    assert!((clip.duration - 3.0).abs() < 1e-12);
    assert!((clip.end() - 12.5).abs() < 1e-12);
    assert!(clip.is_active(9.5));
    assert!(!clip.is_active(12.5));
    assert!(!clip.is_active(9.4));
}

#[test]
fn advance_never_goes_before_zero() {
    let cfg = KaraokeConfig::default();
    let clip = KaraokeClip::new(line_at(0.2, 1.0), None, &cfg);
    assert_eq!(clip.start, 0.0);
    assert!((clip.advance - 0.2).abs() < 1e-12);
    // Content time tracks the line: 0.2 s into the clip is the line start.
    assert_eq!(clip.content_time(0.2), 0.0);
    assert!((clip.content_time(0.7) - 0.5).abs() < 1e-12);
    assert_eq!(clip.content_time(0.0), 0.0);
}

#[test]
fn placement_is_centered_above_bottom_margin() {
    let cfg = KaraokeConfig::default();
    let clip = KaraokeClip::new(line_at(1.0, 2.0), None, &cfg);
    assert_eq!(clip.placement, Placement { x: 40, y: 570 });
}

#[test]
fn frame_at_renders_line_and_preview() {
    let mut cfg = KaraokeConfig::default();
    cfg.layout.font_path = None;
    let clip = KaraokeClip::new(line_at(1.0, 2.0), Some(line_at(2.0, 3.0)), &cfg);
    let mut renderer = LineRenderer::new(&cfg, &FontSource::metrics_only());
    let frame = clip.frame_at(0.75, &mut renderer).unwrap();
    assert_eq!(frame.width, cfg.layout.clip_width_px);
    assert_eq!(frame.data.len(), (frame.width * frame.height * 3) as usize);
    assert!(frame.height > 80);
}
