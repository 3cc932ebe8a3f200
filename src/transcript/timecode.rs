use crate::foundation::error::{KaraokeError, KaraokeResult};

/// Parse a subtitle timecode `HH:MM:SS,mmm` into seconds.
///
/// A `.` is accepted in place of the `,` millisecond separator.
pub fn parse_timecode(s: &str) -> KaraokeResult<f64> {
    let s = s.trim();
    let bad = || KaraokeError::parse(format!("invalid timecode '{s}'"));

    let mut parts = s.split(':');
    let (Some(hh), Some(mm), Some(rest), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    let (ss, ms) = rest.split_once([',', '.']).ok_or_else(bad)?;

    let field = |v: &str| -> KaraokeResult<u64> {
        if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        v.parse::<u64>().map_err(|_| bad())
    };
    let (hh, mm, ss, ms) = (field(hh)?, field(mm)?, field(ss)?, field(ms)?);

    Ok((hh * 3600 + mm * 60 + ss) as f64 + (ms as f64) / 1000.0)
}

/// Parse a `start --> end` time line.
pub fn parse_time_range(line: &str) -> KaraokeResult<(f64, f64)> {
    let (start, end) = line
        .split_once("-->")
        .ok_or_else(|| KaraokeError::parse(format!("missing '-->' in '{}'", line.trim())))?;
    Ok((parse_timecode(start)?, parse_timecode(end)?))
}

/// Format seconds as `HH:MM:SS,mmm`, flooring to whole milliseconds.
pub fn format_timecode(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).floor() as u64;
    let hh = total_ms / 3_600_000;
    let mm = (total_ms % 3_600_000) / 60_000;
    let ss = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;
    format!("{hh:02}:{mm:02}:{ss:02},{ms:03}")
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/timecode.rs"]
mod tests;
