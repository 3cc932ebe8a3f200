use rayon::prelude::*;

use crate::{
    config::settings::KaraokeConfig,
    foundation::{
        core::{FrameIndex, FrameRange},
        error::{KaraokeError, KaraokeResult},
    },
    render::{
        clip::KaraokeClip,
        composite::{FrameRgb, FrameRgba},
        line::LineRenderer,
        text::FontSource,
    },
};

/// Parallelism options for [`render_frame_sequence`].
#[derive(Clone, Debug)]
pub struct RenderThreading {
    /// Render frames on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Frames rendered per parallel batch; bounds how many frames are held at once.
    pub chunk_size: usize,
    /// Pool size; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Video-canvas frame at timeline time `t` with every active clip drawn at its placement.
///
/// Clips are drawn in order, so a later clip covers an earlier one where they overlap.
pub fn compose_overlay(
    clips: &[KaraokeClip],
    t: f64,
    cfg: &KaraokeConfig,
    renderer: &mut LineRenderer,
) -> KaraokeResult<FrameRgb> {
    let bg = cfg.video.background_color;
    let mut canvas = FrameRgba::filled(
        cfg.video.width,
        cfg.video.height,
        bg.to_premul().to_array(),
    );
    for clip in clips.iter().filter(|c| c.is_active(t)) {
        let stack = renderer.render_stack(
            &clip.line,
            clip.next.as_ref(),
            clip.content_time(t - clip.start),
        )?;
        canvas.draw_over(&stack, clip.placement.x, clip.placement.y, 1.0);
    }
    Ok(canvas.flatten(bg))
}

/// Render overlay frames for every frame index in `range`, handing each to `sink` in frame order.
///
/// Frames are not accumulated: the sequential path renders one frame at a time and the parallel
/// path at most `chunk_size` frames per batch. Returns the number of frames delivered. The first
/// error from rendering or from `sink` stops the sequence.
#[tracing::instrument(
    skip(clips, cfg, font, threading, sink),
    fields(frames = range.len_frames())
)]
pub fn render_frame_sequence<F>(
    clips: &[KaraokeClip],
    range: FrameRange,
    cfg: &KaraokeConfig,
    font: &FontSource,
    threading: &RenderThreading,
    mut sink: F,
) -> KaraokeResult<u64>
where
    F: FnMut(FrameIndex, FrameRgb) -> KaraokeResult<()>,
{
    if range.is_empty() {
        return Err(KaraokeError::validation("render range must be non-empty"));
    }
    let fps = cfg.video.fps;

    if !threading.parallel {
        let mut renderer = LineRenderer::new(cfg, font);
        for f in range.start.0..range.end.0 {
            let t = fps.frame_to_secs(FrameIndex(f));
            sink(FrameIndex(f), compose_overlay(clips, t, cfg, &mut renderer)?)?;
        }
        return Ok(range.len_frames());
    }

    let pool = build_thread_pool(threading.threads)?;
    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let frames: Vec<u64> = (chunk_start..chunk_end).collect();
        let rendered = pool.install(|| {
            frames
                .par_iter()
                .map_init(
                    || LineRenderer::new(cfg, font),
                    |renderer, &f| -> KaraokeResult<FrameRgb> {
                        compose_overlay(clips, fps.frame_to_secs(FrameIndex(f)), cfg, renderer)
                    },
                )
                .collect::<Vec<_>>()
        });
        for (f, frame) in frames.into_iter().zip(rendered) {
            sink(FrameIndex(f), frame?)?;
        }
        tracing::debug!(chunk_start, chunk_end, "rendered frame chunk");
        chunk_start = chunk_end;
    }
    Ok(range.len_frames())
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

fn build_thread_pool(threads: Option<usize>) -> KaraokeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(KaraokeError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| KaraokeError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/frames.rs"]
mod tests;
