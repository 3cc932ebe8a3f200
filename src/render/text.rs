use std::{borrow::Cow, path::Path, sync::Arc};

use crate::foundation::color::Rgba8;

/// Advance per character, in ems, assumed when no font face is available.
const FALLBACK_ADVANCE_EM: f32 = 0.55;

/// Font bytes used for shaping and glyph outlines.
///
/// Resolution order: the configured font file, then a system sans-serif face, then none at all.
/// Without a face, text is measured with an approximate advance and not drawn.
#[derive(Clone)]
pub struct FontSource {
    bytes: Option<Arc<Vec<u8>>>,
    index: u32,
    origin: String,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("font_bytes_len", &self.bytes.as_ref().map(|b| b.len()))
            .field("index", &self.index)
            .field("origin", &self.origin)
            .finish()
    }
}

impl FontSource {
    /// Resolve a font, falling back as described on the type.
    pub fn resolve(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match std::fs::read(path) {
                Ok(bytes) => return Self::from_bytes(bytes, path.display().to_string()),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "font file unavailable; falling back to a system face"
                ),
            }
        }
        Self::system_sans_serif().unwrap_or_else(|| {
            tracing::warn!("no usable font face found; text will not be drawn");
            Self::metrics_only()
        })
    }

    /// Use the given font file bytes (face 0).
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<String>) -> Self {
        Self {
            bytes: Some(Arc::new(bytes)),
            index: 0,
            origin: origin.into(),
        }
    }

    /// First sans-serif (or serif) face known to the system font database.
    pub fn system_sans_serif() -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let query = usvg::fontdb::Query {
            families: &[
                usvg::fontdb::Family::SansSerif,
                usvg::fontdb::Family::Serif,
            ],
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };
        let id = db.query(&query)?;
        let family = db
            .face(id)
            .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "system".to_string());
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Some(Self {
            bytes: Some(Arc::new(bytes)),
            index,
            origin: format!("system:{family}"),
        })
    }

    /// No face: measurement only.
    pub fn metrics_only() -> Self {
        Self {
            bytes: None,
            index: 0,
            origin: "none".to_string(),
        }
    }

    /// Whether glyph outlines are available.
    pub fn has_outlines(&self) -> bool {
        self.bytes.is_some()
    }

    /// Where the font came from (file path, `system:<family>` or `none`).
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

/// Shapes and measures text with a single font.
///
/// Holds Parley scratch contexts, so it needs `&mut self`; use one engine per worker.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    family: Option<String>,
    font: Option<vello_cpu::peniko::FontData>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    /// Register `source` with fresh Parley contexts.
    pub fn new(source: &FontSource) -> Self {
        let mut font_ctx = parley::FontContext::default();
        let mut family = None;
        let mut font = None;

        if let Some(bytes) = &source.bytes {
            let families = font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.as_ref().clone()), None);
            family = families
                .first()
                .and_then(|(id, _)| font_ctx.collection.family_name(*id))
                .map(str::to_string);
            if family.is_some() {
                font = Some(vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
                    source.index,
                ));
            } else {
                tracing::warn!(
                    origin = source.origin(),
                    "font bytes yielded no family; text will not be drawn"
                );
            }
        }

        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        }
    }

    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.font.as_ref()
    }

    /// Single-line layout of `text`, or `None` without a font face.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgba8,
    ) -> Option<parley::Layout<Rgba8>> {
        let family = self.family.clone()?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Some(layout)
    }

    /// Horizontal advance of `text` at `size_px`.
    pub fn measure(&mut self, text: &str, size_px: f32) -> f32 {
        match self.layout(text, size_px, Rgba8::default()) {
            Some(layout) => layout
                .lines()
                .map(|line| line.metrics().advance)
                .fold(0.0, f32::max),
            None => text.chars().count() as f32 * size_px * FALLBACK_ADVANCE_EM,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
