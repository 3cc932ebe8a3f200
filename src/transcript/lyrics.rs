use std::sync::LazyLock;

use regex::Regex;

static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("annotation pattern is valid"));

/// Normalize pasted lyric text to one non-empty line per lyric line.
///
/// Trims every line, removes bracketed annotations such as `[Chorus]` and drops lines that end up
/// empty.
pub fn normalize_manual_lyrics(lyrics: &str) -> String {
    lyrics
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| ANNOTATION.replace_all(l, "").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whitespace token count of each non-empty line of `lyrics`.
pub fn tokens_per_line(lyrics: &str) -> Vec<(&str, usize)> {
    lyrics
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| (l, l.split_whitespace().count()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/lyrics.rs"]
mod tests;
