//! Karaoke caption synchronization and rendering.
//!
//! Turns a word-aligned transcript, optionally reconciled against hand-written lyrics, into a
//! frame-accurate karaoke caption track.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: time-coded transcript blocks -> [`WordSegment`]s, with long words clamped
//!    ([`TranscriptParser`]).
//! 2. **Group**: segments -> [`LyricLine`]s, by fixed window or by apportioning segments over
//!    manual lyric lines ([`LineGrouper`], [`apportion`]).
//! 3. **Highlight**: per query time, how much of a line is sung, by word or by syllable
//!    ([`HighlightEngine`], [`Syllabifier`]).
//! 4. **Render**: line (+ next-line preview) -> flat RGB caption bitmap ([`LineRenderer`],
//!    [`KaraokeClip`]).
//!
//! [`build_lines`] and [`build_clips`] run steps 1 and 2 from raw text; [`compose_overlay`] and
//! [`render_frame_sequence`] place clips on a video canvas for previews.
//!
//! Everything is configured through one immutable [`KaraokeConfig`]; there is no global state
//! apart from lazily loaded hyphenation dictionaries.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod grouping;
mod highlight;
mod pipeline;
mod render;
mod timeline;
mod transcript;

pub use crate::config::settings::{
    ClipConfig, GroupingConfig, HighlightConfig, KaraokeConfig, LayoutConfig, PreviewConfig,
    TranscriptConfig, VideoConfig,
};
pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Fps, FrameIndex, FrameRange, Rgba8Premul};
pub use crate::foundation::error::{KaraokeError, KaraokeResult};
pub use crate::grouping::apportion::apportion;
pub use crate::grouping::grouper::{LineGrouper, group_fixed_window, group_manual_lyrics};
pub use crate::highlight::progress::{
    HighlightEngine, HighlightMode, HighlightState, ProgressWeights, segment_progress,
    started_segments, temporal_progress,
};
pub use crate::highlight::syllable::{Syllabifier, SyllableLanguage};
pub use crate::pipeline::build::{build_clips, build_lines, build_lines_from_files};
pub use crate::pipeline::frames::{RenderThreading, compose_overlay, render_frame_sequence};
pub use crate::render::clip::{KaraokeClip, Placement};
pub use crate::render::composite::{FrameRgb, FrameRgba, PremulRgba8, over, stack_vertical};
pub use crate::render::line::LineRenderer;
pub use crate::render::text::{FontSource, TextEngine};
pub use crate::render::wrap::{
    PanelBox, Row, WrappedRows, current_panel, dynamic_font_size, preview_panel, wrap_rows,
};
pub use crate::timeline::model::{LyricLine, Syllable, WordSegment};
pub use crate::transcript::lyrics::{normalize_manual_lyrics, tokens_per_line};
pub use crate::transcript::srt::{TranscriptParser, clamp_word_durations, lines_to_srt};
pub use crate::transcript::timecode::{format_timecode, parse_time_range, parse_timecode};
