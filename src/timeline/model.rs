use serde::{Deserialize, Serialize};

/// A single aligned token: the atomic unit of timing.
///
/// Times are seconds on the source timeline. `end >= start` always holds for segments produced by
/// the transcript parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordSegment {
    /// Token text as emitted by the aligner.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl WordSegment {
    /// Build a segment; an `end` before `start` is raised to `start`.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end: end.max(start),
        }
    }

    /// `end - start` in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A caption display unit spanning one or more contiguous word segments.
///
/// This is the unit of karaoke synchronization: `start` is the first word's start and `end` the
/// last word's end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Display text (the manual lyric line, or the joined tokens in fixed-window mode).
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Timed segments owned by this line, in order.
    pub words: Vec<WordSegment>,
}

impl LyricLine {
    /// Build a line from its timed words. Returns `None` when `words` is empty.
    pub fn from_words(text: impl Into<String>, words: Vec<WordSegment>) -> Option<Self> {
        let start = words.first()?.start;
        let end = words.last()?.end;
        Some(Self {
            text: text.into(),
            start,
            end,
            words,
        })
    }

    /// `end - start` in seconds (may be zero).
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whitespace-separated words of the display text.
    pub fn display_words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

/// A sub-word timing unit derived by proportional interpolation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Syllable {
    /// Syllable text; the syllables of a word concatenate back to the word.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl Syllable {
    /// `end - start` in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
