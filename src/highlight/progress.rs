use serde::{Deserialize, Serialize};

use crate::{
    config::settings::HighlightConfig,
    foundation::error::{KaraokeError, KaraokeResult},
    highlight::syllable::Syllabifier,
    timeline::model::LyricLine,
};

/// Unit of highlighting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Whole words light up as their segment starts.
    Word,
    /// Syllables light up following a blend of line time and segment progress.
    #[default]
    Syllable,
}

/// Blend between temporal and segment progress.
///
/// Weights are relative; they are divided by their sum before use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgressWeights {
    /// Weight of the fraction of line time elapsed.
    pub temporal: f64,
    /// Weight of the fraction of word segments sung.
    pub segment: f64,
}

impl Default for ProgressWeights {
    fn default() -> Self {
        Self {
            temporal: 0.3,
            segment: 0.7,
        }
    }
}

impl ProgressWeights {
    /// Both weights finite and non-negative, and not both zero.
    pub fn validate(&self) -> KaraokeResult<()> {
        let ok = |w: f64| w.is_finite() && w >= 0.0;
        if !ok(self.temporal) || !ok(self.segment) {
            return Err(KaraokeError::validation(
                "highlight.weights must be finite and >= 0",
            ));
        }
        if self.temporal + self.segment <= 0.0 {
            return Err(KaraokeError::validation(
                "highlight.weights must not both be zero",
            ));
        }
        Ok(())
    }

    /// Weighted mean of the two progress values.
    pub fn combine(&self, temporal: f64, segment: f64) -> f64 {
        let sum = self.temporal + self.segment;
        if sum <= 0.0 {
            return 0.0;
        }
        ((self.temporal * temporal + self.segment * segment) / sum).clamp(0.0, 1.0)
    }
}

/// Highlight snapshot of one line at one query time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightState {
    /// Overall progress in `[0, 1]`.
    pub progress: f64,
    /// Units (words or syllables) drawn in the highlight color, counted from the start.
    pub highlighted_units: usize,
    /// Units in the line.
    pub total_units: usize,
}

/// Fraction of the line's duration elapsed `t` seconds after its start.
///
/// Zero-length lines report `0`.
pub fn temporal_progress(line: &LyricLine, t: f64) -> f64 {
    let duration = line.duration();
    if duration <= 0.0 {
        return 0.0;
    }
    (t / duration).clamp(0.0, 1.0)
}

/// Mean per-segment completion `t` seconds after the line's start.
///
/// Segments already over count fully, the segment being sung counts by its elapsed fraction.
pub fn segment_progress(line: &LyricLine, t: f64) -> f64 {
    if line.words.is_empty() {
        return 0.0;
    }
    let now = line.start + t;
    let sum: f64 = line
        .words
        .iter()
        .map(|seg| {
            if now >= seg.end {
                1.0
            } else if now >= seg.start && seg.duration() > 0.0 {
                (now - seg.start) / seg.duration()
            } else {
                0.0
            }
        })
        .sum();
    (sum / line.words.len() as f64).min(1.0)
}

/// Number of segments that have started `t` seconds after the line's start.
pub fn started_segments(line: &LyricLine, t: f64) -> usize {
    line.words
        .iter()
        .filter(|seg| seg.start - line.start <= t)
        .count()
}

/// Computes which part of a line is drawn as sung.
#[derive(Clone, Debug, Default)]
pub struct HighlightEngine {
    cfg: HighlightConfig,
    syllabifier: Syllabifier,
}

impl HighlightEngine {
    /// Build an engine from highlight options.
    pub fn new(cfg: HighlightConfig) -> Self {
        let syllabifier = Syllabifier::new(cfg.language);
        Self { cfg, syllabifier }
    }

    /// Active highlight mode.
    pub fn mode(&self) -> HighlightMode {
        self.cfg.mode
    }

    /// Drawable units of `text`, grouped per display word.
    ///
    /// One unit per word in word mode, its syllables in syllable mode.
    pub fn units(&self, text: &str) -> Vec<Vec<String>> {
        match self.cfg.mode {
            HighlightMode::Word => text
                .split_whitespace()
                .map(|w| vec![w.to_string()])
                .collect(),
            HighlightMode::Syllable => self.syllabifier.split_line(text),
        }
    }

    /// Highlight state of `line`, `t` seconds after its start.
    pub fn state(&self, line: &LyricLine, t: f64) -> HighlightState {
        let total_units: usize = self.units(&line.text).iter().map(Vec::len).sum();
        self.state_for(line, t, total_units)
    }

    // Zero-length lines never highlight.
    pub(crate) fn state_for(&self, line: &LyricLine, t: f64, total_units: usize) -> HighlightState {
        if total_units == 0 || line.duration() <= 0.0 {
            return HighlightState {
                progress: 0.0,
                highlighted_units: 0,
                total_units,
            };
        }

        let (progress, highlighted_units) = match self.cfg.mode {
            HighlightMode::Word => {
                let n = if line.words.is_empty() {
                    units_for(temporal_progress(line, t), total_units)
                } else {
                    started_segments(line, t).min(total_units)
                };
                (n as f64 / total_units as f64, n)
            }
            HighlightMode::Syllable => {
                let p = self.progress(line, t);
                (p, units_for(p, total_units))
            }
        };
        HighlightState {
            progress,
            highlighted_units,
            total_units,
        }
    }

    /// Blended syllable-mode progress of `line`, `t` seconds after its start.
    ///
    /// Lines without timed segments follow line time alone.
    pub fn progress(&self, line: &LyricLine, t: f64) -> f64 {
        if line.duration() <= 0.0 {
            return 0.0;
        }
        let temporal = temporal_progress(line, t);
        if line.words.is_empty() {
            return temporal;
        }
        self.cfg
            .weights
            .combine(temporal, segment_progress(line, t))
    }
}

fn units_for(progress: f64, total: usize) -> usize {
    ((progress * total as f64).floor() as usize).min(total)
}

#[cfg(test)]
#[path = "../../tests/unit/highlight/progress.rs"]
mod tests;
