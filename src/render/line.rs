use kurbo::Shape;

use crate::{
    config::settings::{KaraokeConfig, LayoutConfig, PreviewConfig},
    foundation::{
        color::Rgba8,
        error::{KaraokeError, KaraokeResult},
    },
    highlight::progress::{HighlightEngine, HighlightState},
    render::{
        composite::{FrameRgb, FrameRgba, stack_vertical},
        text::{FontSource, TextEngine},
        wrap::{PanelBox, current_panel, dynamic_font_size, preview_panel, wrap_rows},
    },
    timeline::model::LyricLine,
};

/// Rasterizes lyric lines into caption bitmaps.
///
/// The current line is drawn unit by unit (words or syllables, per the highlight mode) in the
/// sung or upcoming color; the optional next line is drawn below it as a dimmed preview.
#[derive(Debug)]
pub struct LineRenderer {
    layout: LayoutConfig,
    preview: PreviewConfig,
    highlight: HighlightEngine,
    text: TextEngine,
}

struct TextStyle {
    size: f32,
    fill: Rgba8,
    outline: Rgba8,
    outline_width: f32,
}

impl LineRenderer {
    /// Build a renderer drawing with `font`.
    pub fn new(cfg: &KaraokeConfig, font: &FontSource) -> Self {
        Self {
            layout: cfg.layout.clone(),
            preview: cfg.preview.clone(),
            highlight: HighlightEngine::new(cfg.highlight.clone()),
            text: TextEngine::new(font),
        }
    }

    /// Highlight engine driving unit colors.
    pub fn highlight(&self) -> &HighlightEngine {
        &self.highlight
    }

    /// Width of every bitmap this renderer produces.
    pub fn clip_width(&self) -> u32 {
        self.layout.clip_width_px
    }

    /// Current line `t` seconds after its start, plus the highlight state used to color it.
    pub fn render_current(
        &mut self,
        line: &LyricLine,
        t: f64,
    ) -> KaraokeResult<(FrameRgba, HighlightState)> {
        let l = &self.layout;
        let clip_w = l.clip_width_px as f32;
        let size = dynamic_font_size(
            &line.text,
            l.font_size_px,
            l.min_font_size_px,
            l.long_text_threshold,
        );

        let units = self.highlight.units(&line.text);
        let unit_widths: Vec<Vec<f32>> = units
            .iter()
            .map(|word| word.iter().map(|u| self.text.measure(u, size)).collect())
            .collect();
        let word_widths: Vec<f32> = unit_widths.iter().map(|w| w.iter().sum()).collect();
        let space = self.text.measure(" ", size);

        let rows = wrap_rows(&word_widths, space, clip_w - 2.0 * l.panel_padding_px);
        let panel = current_panel(
            &rows,
            size,
            clip_w,
            l.panel_padding_px,
            l.panel_min_width_ratio,
            l.line_height_factor,
        );
        let total_units = units.iter().map(Vec::len).sum();
        let state = self.highlight.state_for(line, t, total_units);

        let mut ctx = new_context(l.clip_width_px, panel.height)?;
        fill_panel(&mut ctx, &panel, l.background_color, l.panel_corner_radius_px);

        let mut unit_index = 0usize;
        for (r, row) in rows.rows.iter().enumerate() {
            let y = r as f32 * panel.row_height + l.panel_padding_px;
            let mut x = ((clip_w - row.width) / 2.0).floor();
            for wi in row.words.clone() {
                for (unit, w) in units[wi].iter().zip(&unit_widths[wi]) {
                    let fill = if unit_index < state.highlighted_units {
                        l.highlight_color
                    } else {
                        l.text_color
                    };
                    let style = TextStyle {
                        size,
                        fill,
                        outline: l.outline_color,
                        outline_width: l.outline_width_px,
                    };
                    draw_text(&mut ctx, &mut self.text, unit, x, y, &style);
                    x += w;
                    unit_index += 1;
                }
                x += space;
            }
        }

        Ok((finish(ctx), state))
    }

    /// Dimmed, smaller preview of an upcoming line.
    pub fn render_preview(&mut self, line: &LyricLine) -> KaraokeResult<FrameRgba> {
        let (l, p) = (&self.layout, &self.preview);
        let clip_w = l.clip_width_px as f32;
        let size = dynamic_font_size(
            &line.text,
            (l.font_size_px * p.size_factor).floor(),
            l.min_font_size_px * p.size_factor,
            l.long_text_threshold,
        );

        let words: Vec<&str> = line.display_words().collect();
        let word_widths: Vec<f32> = words.iter().map(|w| self.text.measure(w, size)).collect();
        let space = self.text.measure(" ", size);
        let rows = wrap_rows(&word_widths, space, clip_w - 2.0 * l.panel_padding_px);
        let panel = preview_panel(&rows, size, clip_w, l.panel_padding_px, p.row_gap_px);

        let mut ctx = new_context(l.clip_width_px, panel.height)?;
        fill_panel(&mut ctx, &panel, l.background_color.scale_alpha(p.alpha), 0.0);

        let style = TextStyle {
            size,
            fill: p.color,
            outline: l.outline_color,
            outline_width: l.outline_width_px * p.outline_factor,
        };
        if p.alpha < 1.0 {
            ctx.push_opacity_layer(p.alpha);
        }
        for (r, row) in rows.rows.iter().enumerate() {
            let text = words[row.words.clone()].join(" ");
            let y = r as f32 * panel.row_height + l.panel_padding_px;
            let x = ((clip_w - row.width) / 2.0).floor();
            draw_text(&mut ctx, &mut self.text, &text, x, y, &style);
        }
        if p.alpha < 1.0 {
            ctx.pop_layer();
        }

        Ok(finish(ctx))
    }

    /// Caption stack with alpha: the current line, with the next line below it when enabled.
    pub fn render_stack(
        &mut self,
        line: &LyricLine,
        next: Option<&LyricLine>,
        t: f64,
    ) -> KaraokeResult<FrameRgba> {
        let (current, _) = self.render_current(line, t)?;
        match next {
            Some(next) if self.preview.enabled => {
                let preview = self.render_preview(next)?;
                Ok(stack_vertical(
                    &current,
                    &preview,
                    self.preview.line_spacing_px,
                ))
            }
            _ => Ok(current),
        }
    }

    /// [`LineRenderer::render_stack`] flattened onto the matte color.
    pub fn render_frame(
        &mut self,
        line: &LyricLine,
        next: Option<&LyricLine>,
        t: f64,
    ) -> KaraokeResult<FrameRgb> {
        Ok(self
            .render_stack(line, next, t)?
            .flatten(self.layout.matte_color))
    }
}

fn new_context(width: u32, height: u32) -> KaraokeResult<vello_cpu::RenderContext> {
    let w: u16 = width
        .try_into()
        .map_err(|_| KaraokeError::render("caption width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| KaraokeError::render("caption height exceeds u16"))?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

fn finish(mut ctx: vello_cpu::RenderContext) -> FrameRgba {
    let mut pixmap = vello_cpu::Pixmap::new(ctx.width(), ctx.height());
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    FrameRgba {
        width: u32::from(pixmap.width()),
        height: u32::from(pixmap.height()),
        data: pixmap.data_as_u8_slice().to_vec(),
    }
}

fn fill_panel(ctx: &mut vello_cpu::RenderContext, panel: &PanelBox, color: Rgba8, radius: f32) {
    if color.a == 0 || panel.width <= 0.0 {
        return;
    }
    let rect = kurbo::Rect::new(
        f64::from(panel.x),
        0.0,
        f64::from(panel.x + panel.width),
        f64::from(panel.height),
    );
    let path = if radius > 0.0 {
        kurbo::RoundedRect::from_rect(rect, f64::from(radius)).to_path(0.1)
    } else {
        rect.to_path(0.1)
    };
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(&path));
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    engine: &mut TextEngine,
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
) {
    let Some(layout) = engine.layout(text, style.size, style.fill) else {
        return;
    };
    let Some(font) = engine.font_data().cloned() else {
        return;
    };

    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(x),
        f64::from(y),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            // Positioned glyphs carry pen advance and baseline offset.
            let glyphs: Vec<vello_cpu::Glyph> = run
                .positioned_glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();

            if style.outline_width > 0.0 && style.outline.a > 0 {
                let o = style.outline;
                // Strokes are centered on the glyph outline.
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(
                    2.0 * f64::from(style.outline_width),
                ));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(o.r, o.g, o.b, o.a));
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .stroke_glyphs(glyphs.iter().cloned());
            }

            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs.into_iter());
        }
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/line.rs"]
mod tests;
