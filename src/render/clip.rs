use serde::Serialize;

use crate::{
    config::settings::KaraokeConfig,
    foundation::error::KaraokeResult,
    render::{composite::FrameRgb, line::LineRenderer},
    timeline::model::LyricLine,
};

/// Top-left corner of a caption clip on the video canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Horizontal offset in pixels (centered, may be negative for clips wider than the canvas).
    pub x: i64,
    /// Vertical offset in pixels.
    pub y: i64,
}

/// One caption clip: a line, its optional successor and where it sits on the timeline.
///
/// The clip opens `advance` seconds before the line starts (never before zero) and closes
/// `padding` seconds after it ends.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KaraokeClip {
    /// Line shown and highlighted.
    pub line: LyricLine,
    /// Line previewed below it.
    pub next: Option<LyricLine>,
    /// Timeline start in seconds.
    pub start: f64,
    /// Length in seconds.
    pub duration: f64,
    /// Seconds between clip start and line start.
    pub advance: f64,
    /// Position on the video canvas.
    pub placement: Placement,
}

impl KaraokeClip {
    /// Clip for `line`, timed and placed from `cfg`.
    pub fn new(line: LyricLine, next: Option<LyricLine>, cfg: &KaraokeConfig) -> Self {
        let advance = cfg.clip.advance_secs.min(line.start.max(0.0));
        let start = line.start - advance;
        let duration = line.duration() + advance + cfg.clip.padding_secs;
        let placement = Placement {
            x: (i64::from(cfg.video.width) - i64::from(cfg.layout.clip_width_px)) / 2,
            y: i64::from(cfg.video.height) - i64::from(cfg.video.bottom_margin_px),
        };
        Self {
            line,
            next,
            start,
            duration,
            advance,
            placement,
        }
    }

    /// Timeline end in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether timeline time `t` falls inside `[start, end)`.
    pub fn is_active(&self, t: f64) -> bool {
        t >= self.start && t < self.end()
    }

    /// Seconds since the line started, for clip-relative time `t`; zero during the advance.
    pub fn content_time(&self, t: f64) -> f64 {
        (t - self.advance).max(0.0)
    }

    /// Flat caption frame at clip-relative time `t`.
    pub fn frame_at(&self, t: f64, renderer: &mut LineRenderer) -> KaraokeResult<FrameRgb> {
        renderer.render_frame(&self.line, self.next.as_ref(), self.content_time(t))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
