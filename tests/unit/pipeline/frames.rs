use super::*;
use crate::timeline::model::{LyricLine, WordSegment};

fn small_config() -> KaraokeConfig {
    let mut cfg = KaraokeConfig::default();
    cfg.layout.font_path = None;
    cfg.layout.clip_width_px = 160;
    cfg.video.width = 200;
    cfg.video.height = 120;
    cfg.video.bottom_margin_px = 100;
    cfg
}

fn clips(cfg: &KaraokeConfig) -> Vec<KaraokeClip> {
    let a = LyricLine::from_words("la la", vec![WordSegment::new("la", 1.0, 2.0)]).unwrap();
    let b = LyricLine::from_words("lo lo", vec![WordSegment::new("lo", 2.5, 3.0)]).unwrap();
    vec![
        KaraokeClip::new(a, Some(b.clone()), cfg),
        KaraokeClip::new(b, None, cfg),
    ]
}

#[test]
fn overlay_without_active_clips_is_background() {
    let cfg = small_config();
    let mut renderer = LineRenderer::new(&cfg, &FontSource::metrics_only());
    let frame = compose_overlay(&clips(&cfg), 0.1, &cfg, &mut renderer).unwrap();
    assert_eq!((frame.width, frame.height), (200, 120));
    assert!(frame.data.chunks_exact(3).all(|p| p == [0x1a, 0x1a, 0x1a]));
}

#[test]
fn overlay_draws_active_clip_at_its_placement() {
    let cfg = small_config();
    let mut renderer = LineRenderer::new(&cfg, &FontSource::metrics_only());
    let frame = compose_overlay(&clips(&cfg), 1.2, &cfg, &mut renderer).unwrap();
    // Panel (black at alpha 180) over the #1a1a1a canvas.
    assert_eq!(frame.pixel(100, 60), Some([8, 8, 8]));
    assert_eq!(frame.pixel(100, 5), Some([0x1a, 0x1a, 0x1a]));
}

fn collect(
    clips: &[KaraokeClip],
    range: FrameRange,
    cfg: &KaraokeConfig,
    threading: &RenderThreading,
) -> KaraokeResult<Vec<(FrameIndex, FrameRgb)>> {
    let mut out = Vec::new();
    let n = render_frame_sequence(
        clips,
        range,
        cfg,
        &FontSource::metrics_only(),
        threading,
        |f, frame| {
            out.push((f, frame));
            Ok(())
        },
    )?;
    assert_eq!(n as usize, out.len());
    Ok(out)
}

#[test]
fn parallel_sequence_matches_sequential() {
    let cfg = small_config();
    let clips = clips(&cfg);
    let range = FrameRange::new(FrameIndex(25), FrameIndex(40)).unwrap();

    let seq = collect(&clips, range, &cfg, &RenderThreading::default()).unwrap();
    let par = collect(
        &clips,
        range,
        &cfg,
        &RenderThreading {
            parallel: true,
            chunk_size: 4,
            threads: Some(2),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 15);
    assert_eq!(seq, par);
}

#[test]
fn frames_reach_the_sink_in_order_in_bounded_chunks() {
    let cfg = small_config();
    let clips = clips(&cfg);
    let range = FrameRange::new(FrameIndex(10), FrameIndex(21)).unwrap();
    let threading = RenderThreading {
        parallel: true,
        chunk_size: 3,
        threads: Some(3),
    };

    let frames = collect(&clips, range, &cfg, &threading).unwrap();
    let indices: Vec<u64> = frames.iter().map(|(f, _)| f.0).collect();
    assert_eq!(indices, (10..21).collect::<Vec<_>>());

    // A zero chunk size still makes progress one frame at a time.
    let one_by_one = RenderThreading {
        chunk_size: 0,
        ..threading
    };
    assert_eq!(collect(&clips, range, &cfg, &one_by_one).unwrap().len(), 11);
}

#[test]
fn sink_error_stops_the_sequence() {
    let cfg = small_config();
    let clips = clips(&cfg);
    let range = FrameRange::new(FrameIndex(0), FrameIndex(50)).unwrap();
    for threading in [
        RenderThreading::default(),
        RenderThreading {
            parallel: true,
            chunk_size: 8,
            threads: Some(2),
        },
    ] {
        let mut seen = 0;
        let err = render_frame_sequence(
            &clips,
            range,
            &cfg,
            &FontSource::metrics_only(),
            &threading,
            |f, _| {
                seen += 1;
                if f.0 == 5 {
                    Err(KaraokeError::render("disk full"))
                } else {
                    Ok(())
                }
            },
        )
        .unwrap_err();
        assert!(matches!(err, KaraokeError::Render(_)));
        assert_eq!(seen, 6);
    }
}

#[test]
fn bad_ranges_and_thread_counts_are_rejected() {
    let cfg = small_config();
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(collect(&[], empty, &cfg, &RenderThreading::default()).is_err());

    let range = FrameRange::new(FrameIndex(0), FrameIndex(1)).unwrap();
    let zero = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    let err = collect(&[], range, &cfg, &zero).unwrap_err();
    assert!(matches!(err, KaraokeError::Validation(_)));
}
