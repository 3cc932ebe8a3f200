use std::ops::Range;

/// Font size for `text`: `base` up to `threshold` characters, scaled down beyond that but never
/// below `min`.
pub fn dynamic_font_size(text: &str, base: f32, min: f32, threshold: usize) -> f32 {
    let len = text.chars().count();
    if len <= threshold {
        return base;
    }
    (base * threshold as f32 / len as f32).floor().max(min)
}

/// One visual row: a contiguous run of display words.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Indices into the line's display words.
    pub words: Range<usize>,
    /// Measured width including inter-word spaces.
    pub width: f32,
}

/// Visual wrapping of one line's display words.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedRows {
    /// Rows top to bottom; never empty.
    pub rows: Vec<Row>,
}

impl WrappedRows {
    /// Widest row.
    pub fn max_width(&self) -> f32 {
        self.rows.iter().map(|r| r.width).fold(0.0, f32::max)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Greedy packing of words into rows no wider than `max_width`.
///
/// A word that alone exceeds `max_width` gets a row of its own. No words yields one empty row.
pub fn wrap_rows(word_widths: &[f32], space_width: f32, max_width: f32) -> WrappedRows {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut width = 0.0f32;

    for (i, &w) in word_widths.iter().enumerate() {
        if i == start {
            width = w;
            continue;
        }
        let candidate = width + space_width + w;
        if candidate <= max_width {
            width = candidate;
        } else {
            rows.push(Row {
                words: start..i,
                width,
            });
            start = i;
            width = w;
        }
    }
    rows.push(Row {
        words: start..word_widths.len(),
        width: if word_widths.is_empty() { 0.0 } else { width },
    });
    WrappedRows { rows }
}

/// Size and horizontal position of a background panel inside a clip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelBox {
    /// Left edge.
    pub x: f32,
    /// Panel width.
    pub width: f32,
    /// Panel (and bitmap) height in pixels.
    pub height: u32,
    /// Height of one text row.
    pub row_height: f32,
}

/// Panel for the current line: at least `min_ratio` of the clip wide and at least one row tall.
pub fn current_panel(
    rows: &WrappedRows,
    font_size: f32,
    clip_width: f32,
    padding: f32,
    min_ratio: f32,
    line_height_factor: f32,
) -> PanelBox {
    let row_height = (font_size * line_height_factor).floor();
    let min_width = (clip_width * min_ratio).floor();
    let width = min_width.max((rows.max_width() + 2.0 * padding).min(clip_width));
    let height = (font_size + 2.0 * padding).max(rows.len() as f32 * row_height + 2.0 * padding);
    PanelBox {
        x: ((clip_width - width) / 2.0).floor(),
        width,
        height: height.ceil() as u32,
        row_height,
    }
}

/// Panel for the next-line preview: hugs the text.
pub fn preview_panel(
    rows: &WrappedRows,
    font_size: f32,
    clip_width: f32,
    padding: f32,
    row_gap: f32,
) -> PanelBox {
    let row_height = font_size + row_gap;
    let width = (rows.max_width() + 2.0 * padding).min(clip_width);
    let height = rows.len() as f32 * row_height + 2.0 * padding;
    PanelBox {
        x: ((clip_width - width) / 2.0).floor(),
        width,
        height: height.ceil() as u32,
        row_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/wrap.rs"]
mod tests;
