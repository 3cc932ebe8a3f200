use std::sync::LazyLock;

use hyphenation::{Hyphenator, Language, Load, Standard};
use serde::{Deserialize, Serialize};

use crate::timeline::model::{LyricLine, Syllable, WordSegment};

static SPANISH: LazyLock<Option<Standard>> = LazyLock::new(|| load(Language::Spanish));
static ENGLISH_US: LazyLock<Option<Standard>> = LazyLock::new(|| load(Language::EnglishUS));

fn load(language: Language) -> Option<Standard> {
    match Standard::from_embedded(language) {
        Ok(dict) => Some(dict),
        Err(e) => {
            tracing::warn!(
                ?language,
                error = %e,
                "hyphenation dictionary unavailable; words stay whole"
            );
            None
        }
    }
}

/// Hyphenation dictionary used for syllable splitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyllableLanguage {
    /// Spanish patterns.
    #[default]
    Spanish,
    /// US English patterns.
    EnglishUs,
}

impl SyllableLanguage {
    fn dictionary(self) -> Option<&'static Standard> {
        match self {
            Self::Spanish => SPANISH.as_ref(),
            Self::EnglishUs => ENGLISH_US.as_ref(),
        }
    }
}

/// Splits words into syllables and interpolates their timing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Syllabifier {
    language: SyllableLanguage,
}

impl Syllabifier {
    /// Build a splitter for `language`.
    pub fn new(language: SyllableLanguage) -> Self {
        Self { language }
    }

    /// Syllables of `word`, in order. They concatenate back to `word`.
    ///
    /// Words the dictionary cannot split come back whole.
    pub fn split_text(&self, word: &str) -> Vec<String> {
        if word.chars().count() < 2 {
            return vec![word.to_string()];
        }
        let Some(dict) = self.language.dictionary() else {
            return vec![word.to_string()];
        };
        let parts: Vec<String> = dict
            .hyphenate(word)
            .into_iter()
            .segments()
            .map(String::from)
            .collect();
        if parts.is_empty() {
            vec![word.to_string()]
        } else {
            parts
        }
    }

    /// Syllables of every display word of `text`, grouped per word.
    pub fn split_line(&self, text: &str) -> Vec<Vec<String>> {
        text.split_whitespace().map(|w| self.split_text(w)).collect()
    }

    /// Timed syllables of one word segment.
    ///
    /// Each syllable gets a share of the word duration proportional to its character count. The
    /// last syllable ends exactly at the word end.
    pub fn split_word(&self, word: &WordSegment) -> Vec<Syllable> {
        let parts = self.split_text(&word.text);
        let total_chars = word.text.chars().count();
        if total_chars == 0 || parts.len() < 2 {
            return vec![Syllable {
                text: word.text.clone(),
                start: word.start,
                end: word.end,
            }];
        }

        let per_char = word.duration() / total_chars as f64;
        let mut consumed = 0usize;
        let last = parts.len() - 1;
        parts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let start = word.start + consumed as f64 * per_char;
                consumed += text.chars().count();
                let end = if i == last {
                    word.end
                } else {
                    word.start + consumed as f64 * per_char
                };
                Syllable { text, start, end }
            })
            .collect()
    }

    /// Timed syllables of every segment of `line`, in order.
    pub fn line_syllables(&self, line: &LyricLine) -> Vec<Syllable> {
        line.words.iter().flat_map(|w| self.split_word(w)).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/highlight/syllable.rs"]
mod tests;
