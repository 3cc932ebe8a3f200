use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    foundation::color::Rgba8,
    foundation::core::Fps,
    foundation::error::{KaraokeError, KaraokeResult},
    highlight::progress::{HighlightMode, ProgressWeights},
    highlight::syllable::SyllableLanguage,
};

/// Immutable configuration shared by every stage.
///
/// Each component takes the slice of configuration it needs at construction, so several
/// configurations can be used side by side (parallel tests, per-call overrides) without any
/// process-wide state. Every field has a default; a JSON file only needs the fields it overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KaraokeConfig {
    /// Transcript parsing options.
    pub transcript: TranscriptConfig,
    /// Line grouping options.
    pub grouping: GroupingConfig,
    /// Highlight strategy options.
    pub highlight: HighlightConfig,
    /// Current-line layout and colors.
    pub layout: LayoutConfig,
    /// Next-line preview options.
    pub preview: PreviewConfig,
    /// Clip timing around each line.
    pub clip: ClipConfig,
    /// Target video canvas, used for clip placement and previews.
    pub video: VideoConfig,
}

/// Transcript parsing options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscriptConfig {
    /// Ceiling applied to any single word duration, in seconds.
    pub max_word_duration_secs: f64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            max_word_duration_secs: 3.0,
        }
    }
}

/// Line grouping options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupingConfig {
    /// Words per line when no manual lyrics are supplied.
    pub words_per_line: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self { words_per_line: 10 }
    }
}

/// Highlight strategy options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightConfig {
    /// Word-level or syllable-level highlighting.
    pub mode: HighlightMode,
    /// Blend between temporal and segment progress (syllable mode).
    pub weights: ProgressWeights,
    /// Hyphenation dictionary used to split words into syllables.
    pub language: SyllableLanguage,
}

/// Current-line layout and colors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Font file; when missing or unreadable a system sans-serif face is used.
    pub font_path: Option<PathBuf>,
    /// Base font size in pixels.
    pub font_size_px: f32,
    /// Floor for the size reduction applied to long lines.
    pub min_font_size_px: f32,
    /// Character count above which the font size is scaled down.
    pub long_text_threshold: usize,
    /// Width of the rendered caption bitmap.
    pub clip_width_px: u32,
    /// Row height as a multiple of the font size.
    pub line_height_factor: f32,
    /// Color of units that have not been sung yet.
    pub text_color: Rgba8,
    /// Color of units already sung.
    pub highlight_color: Rgba8,
    /// Stroke color drawn around every unit.
    pub outline_color: Rgba8,
    /// Stroke width in pixels.
    pub outline_width_px: f32,
    /// Panel color behind the text (alpha is honored).
    pub background_color: Rgba8,
    /// Padding between the panel edge and the text.
    pub panel_padding_px: f32,
    /// Minimum panel width as a fraction of the clip width.
    pub panel_min_width_ratio: f32,
    /// Corner radius of the panel; `0` draws square corners.
    pub panel_corner_radius_px: f32,
    /// Color transparent pixels are flattened onto.
    pub matte_color: Rgba8,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font_path: Some(PathBuf::from("fonts/kg.ttf")),
            font_size_px: 36.0,
            min_font_size_px: 30.0,
            long_text_threshold: 100,
            clip_width_px: 1280 - 2 * 40,
            line_height_factor: 1.4,
            text_color: Rgba8::rgb(255, 255, 255),
            highlight_color: Rgba8::rgb(255, 255, 0),
            outline_color: Rgba8::rgb(0, 0, 0),
            outline_width_px: 3.0,
            background_color: Rgba8::rgba(0, 0, 0, 180),
            panel_padding_px: 15.0,
            panel_min_width_ratio: 0.4,
            panel_corner_radius_px: 10.0,
            matte_color: Rgba8::rgb(0, 0, 0),
        }
    }
}

/// Next-line preview options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Draw the upcoming line under the current one.
    pub enabled: bool,
    /// Text color of the preview.
    pub color: Rgba8,
    /// Opacity applied to the preview text and panel.
    pub alpha: f32,
    /// Preview font size relative to the current line.
    pub size_factor: f32,
    /// Extra pixels added to the font size to get the preview row height.
    pub row_gap_px: f32,
    /// Preview stroke width relative to the current line.
    pub outline_factor: f32,
    /// Vertical gap between the current line and the preview.
    pub line_spacing_px: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: Rgba8::rgb(0xbb, 0xbb, 0xbb),
            alpha: 0.7,
            size_factor: 0.85,
            row_gap_px: 10.0,
            outline_factor: 0.75,
            line_spacing_px: 20,
        }
    }
}

/// Clip timing around each line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipConfig {
    /// Seconds a clip appears before its line starts.
    pub advance_secs: f64,
    /// Seconds a clip stays after its line ends.
    pub padding_secs: f64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            advance_secs: 0.5,
            padding_secs: 0.5,
        }
    }
}

/// Target video canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VideoConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Distance from the bottom edge to the top of each caption clip.
    pub bottom_margin_px: u32,
    /// Preview background (stands in for the source video).
    pub background_color: Rgba8,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: Fps { num: 30, den: 1 },
            bottom_margin_px: 150,
            background_color: Rgba8::rgb(0x1a, 0x1a, 0x1a),
        }
    }
}

impl KaraokeConfig {
    /// Parse configuration from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> KaraokeResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| KaraokeError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> KaraokeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Pretty JSON form of this configuration.
    pub fn to_json_pretty(&self) -> KaraokeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| KaraokeError::serde(e.to_string()))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> KaraokeResult<()> {
        let max_dur = self.transcript.max_word_duration_secs;
        if !max_dur.is_finite() || max_dur <= 0.0 {
            return Err(KaraokeError::validation(
                "transcript.max_word_duration_secs must be finite and > 0",
            ));
        }
        if self.grouping.words_per_line == 0 {
            return Err(KaraokeError::validation(
                "grouping.words_per_line must be >= 1",
            ));
        }
        self.highlight.weights.validate()?;

        let l = &self.layout;
        positive("layout.font_size_px", l.font_size_px)?;
        positive("layout.min_font_size_px", l.min_font_size_px)?;
        positive("layout.line_height_factor", l.line_height_factor)?;
        non_negative("layout.outline_width_px", l.outline_width_px)?;
        non_negative("layout.panel_padding_px", l.panel_padding_px)?;
        non_negative("layout.panel_corner_radius_px", l.panel_corner_radius_px)?;
        unit_interval("layout.panel_min_width_ratio", l.panel_min_width_ratio)?;
        if l.long_text_threshold == 0 {
            return Err(KaraokeError::validation(
                "layout.long_text_threshold must be >= 1",
            ));
        }
        if l.clip_width_px == 0 || l.clip_width_px > u32::from(u16::MAX) {
            return Err(KaraokeError::validation(
                "layout.clip_width_px must be in 1..=65535",
            ));
        }

        let p = &self.preview;
        unit_interval("preview.alpha", p.alpha)?;
        positive("preview.size_factor", p.size_factor)?;
        non_negative("preview.row_gap_px", p.row_gap_px)?;
        non_negative("preview.outline_factor", p.outline_factor)?;

        let c = &self.clip;
        if !(c.advance_secs.is_finite() && c.advance_secs >= 0.0) {
            return Err(KaraokeError::validation(
                "clip.advance_secs must be finite and >= 0",
            ));
        }
        if !(c.padding_secs.is_finite() && c.padding_secs >= 0.0) {
            return Err(KaraokeError::validation(
                "clip.padding_secs must be finite and >= 0",
            ));
        }

        let v = &self.video;
        Fps::new(v.fps.num, v.fps.den)?;
        if v.width == 0 || v.height == 0 {
            return Err(KaraokeError::validation("video canvas must be non-empty"));
        }
        if v.width > u32::from(u16::MAX) || v.height > u32::from(u16::MAX) {
            return Err(KaraokeError::validation(
                "video canvas dimensions must fit in u16",
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, v: f32) -> KaraokeResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(KaraokeError::validation(format!(
            "{name} must be finite and > 0"
        )))
    }
}

fn non_negative(name: &str, v: f32) -> KaraokeResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(KaraokeError::validation(format!(
            "{name} must be finite and >= 0"
        )))
    }
}

fn unit_interval(name: &str, v: f32) -> KaraokeResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(KaraokeError::validation(format!("{name} must be in [0, 1]")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
