use crate::{
    config::settings::GroupingConfig,
    grouping::apportion::apportion,
    timeline::model::{LyricLine, WordSegment},
    transcript::lyrics::{normalize_manual_lyrics, tokens_per_line},
};

/// Groups word segments into display lines.
///
/// Without manual lyrics, segments are chunked into fixed windows. With manual lyrics, segments
/// are distributed over the lyric lines in proportion to each line's word count.
#[derive(Clone, Debug, Default)]
pub struct LineGrouper {
    cfg: GroupingConfig,
}

impl LineGrouper {
    /// Build a grouper with the given options.
    pub fn new(cfg: GroupingConfig) -> Self {
        Self { cfg }
    }

    /// Group `segments`, reconciling against `manual_lyrics` when given.
    ///
    /// Manual lyrics are normalized first (blank lines and `[...]` annotations removed).
    pub fn group(&self, segments: &[WordSegment], manual_lyrics: Option<&str>) -> Vec<LyricLine> {
        match manual_lyrics {
            Some(lyrics) => group_manual_lyrics(&normalize_manual_lyrics(lyrics), segments),
            None => group_fixed_window(segments, self.cfg.words_per_line),
        }
    }
}

/// Chunk `segments` into lines of `size` words; the last line may be shorter.
pub fn group_fixed_window(segments: &[WordSegment], size: usize) -> Vec<LyricLine> {
    if size == 0 {
        return Vec::new();
    }
    segments
        .chunks(size)
        .filter_map(|chunk| {
            let text = chunk
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            LyricLine::from_words(text, chunk.to_vec())
        })
        .collect()
}

/// Distribute `segments` over the lines of already-normalized `lyrics`.
///
/// Matching is positional: segments are sliced off the front in order, as many per line as
/// [`apportion`] grants it. Lines left without segments are omitted.
pub fn group_manual_lyrics(lyrics: &str, segments: &[WordSegment]) -> Vec<LyricLine> {
    let lines = tokens_per_line(lyrics);
    let weights: Vec<usize> = lines.iter().map(|(_, n)| *n).collect();
    let allocation = apportion(&weights, segments.len());
    tracing::debug!(
        lines = lines.len(),
        segments = segments.len(),
        ?allocation,
        "apportioned segments over lyric lines"
    );

    let mut rest = segments;
    lines
        .iter()
        .zip(allocation)
        .filter_map(|(&(text, _), n)| {
            let (head, tail) = rest.split_at(n.min(rest.len()));
            rest = tail;
            LyricLine::from_words(text, head.to_vec())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/grouping/grouper.rs"]
mod tests;
