use std::path::Path;

use anyhow::Context;

use crate::{
    config::settings::KaraokeConfig,
    foundation::error::{KaraokeError, KaraokeResult},
    grouping::grouper::LineGrouper,
    render::clip::KaraokeClip,
    timeline::model::{LyricLine, WordSegment},
    transcript::srt::TranscriptParser,
};

/// Parse a transcript and group it into lines, reconciling against `lyrics` when given.
///
/// Fails with [`KaraokeError::NoAlignableContent`] when nothing can be timed.
#[tracing::instrument(skip_all, fields(manual = lyrics.is_some()))]
pub fn build_lines(
    transcript: &str,
    lyrics: Option<&str>,
    cfg: &KaraokeConfig,
) -> KaraokeResult<Vec<LyricLine>> {
    cfg.validate()?;
    let segments = TranscriptParser::new(cfg.transcript.clone()).parse(transcript);
    group_segments(&segments, lyrics, cfg)
}

/// File-based [`build_lines`]. A missing transcript file counts as an empty transcript.
#[tracing::instrument(skip(cfg))]
pub fn build_lines_from_files(
    transcript_path: &Path,
    lyrics_path: Option<&Path>,
    cfg: &KaraokeConfig,
) -> KaraokeResult<Vec<LyricLine>> {
    cfg.validate()?;
    let segments = TranscriptParser::new(cfg.transcript.clone()).parse_file(transcript_path)?;
    let lyrics = lyrics_path
        .map(|p| {
            std::fs::read_to_string(p).with_context(|| format!("read lyrics '{}'", p.display()))
        })
        .transpose()?;
    group_segments(&segments, lyrics.as_deref(), cfg)
}

fn group_segments(
    segments: &[WordSegment],
    lyrics: Option<&str>,
    cfg: &KaraokeConfig,
) -> KaraokeResult<Vec<LyricLine>> {
    if segments.is_empty() {
        return Err(KaraokeError::no_alignable_content(
            "transcript contains no timed words",
        ));
    }
    let lines = LineGrouper::new(cfg.grouping.clone()).group(segments, lyrics);
    if lines.is_empty() {
        return Err(KaraokeError::no_alignable_content(
            "lyrics contain no words to align",
        ));
    }
    tracing::info!(
        segments = segments.len(),
        lines = lines.len(),
        "grouped transcript into lines"
    );
    Ok(lines)
}

/// One clip per line, each previewing its successor.
pub fn build_clips(lines: &[LyricLine], cfg: &KaraokeConfig) -> Vec<KaraokeClip> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| KaraokeClip::new(line.clone(), lines.get(i + 1).cloned(), cfg))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/build.rs"]
mod tests;
