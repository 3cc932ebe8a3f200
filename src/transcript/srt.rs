use std::path::Path;

use anyhow::Context;

use crate::{
    config::settings::TranscriptConfig,
    foundation::error::KaraokeResult,
    timeline::model::{LyricLine, WordSegment},
    transcript::timecode::{format_timecode, parse_time_range},
};

/// Turns time-coded subtitle blocks into a flat list of word segments.
///
/// Each block's interval is split evenly across its whitespace tokens, which approximates word
/// timing when the aligner only reports phrase-level timestamps. Blocks with an unreadable time
/// line are skipped.
#[derive(Clone, Debug, Default)]
pub struct TranscriptParser {
    cfg: TranscriptConfig,
}

impl TranscriptParser {
    /// Build a parser with the given options.
    pub fn new(cfg: TranscriptConfig) -> Self {
        Self { cfg }
    }

    /// Parse transcript text and clamp anomalous durations.
    pub fn parse(&self, text: &str) -> Vec<WordSegment> {
        let segments = parse_word_blocks(text);
        clamp_word_durations(segments, self.cfg.max_word_duration_secs)
    }

    /// Read and parse a transcript file.
    ///
    /// A missing file is not an error: it yields no segments, and the caller decides whether an
    /// empty transcript is fatal.
    pub fn parse_file(&self, path: &Path) -> KaraokeResult<Vec<WordSegment>> {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "transcript file not found");
            return Ok(Vec::new());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read transcript '{}'", path.display()))?;
        Ok(self.parse(&text))
    }
}

fn parse_word_blocks(text: &str) -> Vec<WordSegment> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let mut segments = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if !is_block_index(line) {
            i += 1;
            continue;
        }
        i += 1;
        let Some(time_line) = lines.get(i) else {
            break;
        };
        let (start, end) = match parse_time_range(time_line) {
            Ok((start, end)) if end >= start => (start, end),
            Ok((start, end)) => {
                tracing::warn!(
                    index = line,
                    start,
                    end,
                    "skipping block that ends before it starts"
                );
                i += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!(index = line, error = %e, "skipping block with bad time line");
                i += 1;
                continue;
            }
        };
        i += 1;

        let mut block_text = Vec::new();
        while let Some(l) = lines.get(i).filter(|l| !l.is_empty()) {
            block_text.push(*l);
            i += 1;
        }
        let joined = block_text.join(" ");
        let tokens: Vec<&str> = joined.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let step = (end - start) / tokens.len() as f64;
        for (k, token) in tokens.iter().enumerate() {
            let token_start = start + k as f64 * step;
            segments.push(WordSegment::new(*token, token_start, token_start + step));
        }
    }
    segments
}

fn is_block_index(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}

/// Clamp every segment longer than `max_duration` to exactly `max_duration`.
///
/// Keeps the last word before an instrumental break from holding the highlight for the whole
/// break.
pub fn clamp_word_durations(segments: Vec<WordSegment>, max_duration: f64) -> Vec<WordSegment> {
    segments
        .into_iter()
        .map(|mut seg| {
            if seg.duration() > max_duration {
                tracing::debug!(
                    word = %seg.text,
                    duration = seg.duration(),
                    max_duration,
                    "clamping long word segment"
                );
                seg.end = seg.start + max_duration;
            }
            seg
        })
        .collect()
}

/// Write grouped lines as a line-level subtitle file (one block per line).
pub fn lines_to_srt(lines: &[LyricLine]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timecode(line.start),
            format_timecode(line.end),
            line.text
        ));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/srt.rs"]
mod tests;
