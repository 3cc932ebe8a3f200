use crate::foundation::{
    color::Rgba8,
    error::{KaraokeError, KaraokeResult},
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied RGBA8 raster, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Opaque RGB8 raster, row-major and tightly packed.
///
/// This is what the video compositor consumes: no alpha handling is needed downstream.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRgb {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 3` bytes.
    pub data: Vec<u8>,
}

impl FrameRgba {
    /// Surface filled with one premultiplied color.
    pub fn filled(width: u32, height: u32, px: PremulRgba8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Fully transparent surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Flatten onto an opaque `matte`.
    pub fn flatten(&self, matte: Rgba8) -> FrameRgb {
        let m = [matte.r, matte.g, matte.b];
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            let inv = 255u16 - u16::from(px[3]);
            for c in 0..3 {
                data.push(add_sat_u8(px[c], mul_div255(u16::from(m[c]), inv)));
            }
        }
        FrameRgb {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Draw `src` over this surface with its top-left corner at `(x, y)`, clipping at the edges.
    pub fn draw_over(&mut self, src: &FrameRgba, x: i64, y: i64, opacity: f32) {
        let dst_w = i64::from(self.width);
        let dst_h = i64::from(self.height);
        for sy in 0..i64::from(src.height) {
            let dy = y + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            for sx in 0..i64::from(src.width) {
                let dx = x + sx;
                if dx < 0 || dx >= dst_w {
                    continue;
                }
                let si = ((sy * i64::from(src.width) + sx) * 4) as usize;
                let di = ((dy * dst_w + dx) * 4) as usize;
                let s = [
                    src.data[si],
                    src.data[si + 1],
                    src.data[si + 2],
                    src.data[si + 3],
                ];
                let d = [
                    self.data[di],
                    self.data[di + 1],
                    self.data[di + 2],
                    self.data[di + 3],
                ];
                self.data[di..di + 4].copy_from_slice(&over(d, s, opacity));
            }
        }
    }
}

impl FrameRgb {
    /// Convert into an `image` buffer for encoding.
    pub fn to_image(&self) -> KaraokeResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| KaraokeError::render("rgb buffer does not match frame dimensions"))
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}

/// Stack `top` above `bottom` with `gap` pixels between them, each centered horizontally.
pub fn stack_vertical(top: &FrameRgba, bottom: &FrameRgba, gap: u32) -> FrameRgba {
    let width = top.width.max(bottom.width);
    let height = top.height + gap + bottom.height;
    let mut out = FrameRgba::transparent(width, height);
    out.draw_over(top, i64::from((width - top.width) / 2), 0, 1.0);
    out.draw_over(
        bottom,
        i64::from((width - bottom.width) / 2),
        i64::from(top.height + gap),
        1.0,
    );
    out
}

/// Source-over for premultiplied pixels, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
