//! The raster drawing contract and its software implementation.
//!
//! `Surface` is the minimal set of 2D primitives the effects core needs:
//! filled rects, stroked circles, a global alpha with save/restore, and
//! bitmap blits. Any backend exposing these operations can host the engine;
//! `SoftwareSurface` is the CPU reference backend used by tests and the
//! software render tier.

use super::color::Color;

/// An RGBA8888 pixel buffer. Pixels are packed little-endian (0xAABBGGRR),
/// the layout `Color::packed` produces.
#[derive(Debug, Clone)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Create a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, packed: u32) {
        self.pixels[(y * self.width + x) as usize] = packed;
    }

    /// Raw pixel words, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel data as bytes for host upload (RGBA8888, row-major).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Rescale with nearest-neighbor sampling. Each destination pixel maps
    /// back to `floor(dst / scale)`, which keeps pixel-art edges crisp
    /// (no smoothing, no new colors).
    pub fn scaled_nearest(&self, scale: f32) -> Bitmap {
        let dw = ((self.width as f32 * scale).round() as u32).max(1);
        let dh = ((self.height as f32 * scale).round() as u32).max(1);
        let mut out = Bitmap::new(dw, dh);
        for dy in 0..dh {
            let sy = ((dy as f32 / scale) as u32).min(self.height - 1);
            for dx in 0..dw {
                let sx = ((dx as f32 / scale) as u32).min(self.width - 1);
                out.set_pixel(dx, dy, self.pixel(sx, sy));
            }
        }
        out
    }
}

/// Minimal 2D raster target.
///
/// Draw state (global alpha, fill/stroke colors) lives on the surface and
/// participates in `save`/`restore`, mirroring how canvas-style contexts
/// behave. All coordinates are in device pixels.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Push the current draw state.
    fn save(&mut self);
    /// Pop the most recently saved draw state. No-op when nothing is saved.
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);
    fn global_alpha(&self) -> f32;
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);

    /// Fill an axis-aligned rect with the fill color at the global alpha.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Stroke a 1px circle outline with the stroke color at the global alpha.
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32);
    /// Source-over blit of a bitmap, its per-pixel alpha scaled by the
    /// global alpha.
    fn blit(&mut self, bitmap: &Bitmap, x: f32, y: f32);
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    alpha: f32,
    fill: Color,
    stroke: Color,
}

impl Default for DrawState {
    fn default() -> Self {
        DrawState {
            alpha: 1.0,
            fill: Color::BLACK,
            stroke: Color::BLACK,
        }
    }
}

/// CPU rasterizer over a `Bitmap` with source-over alpha blending.
pub struct SoftwareSurface {
    target: Bitmap,
    state: DrawState,
    stack: Vec<DrawState>,
}

impl SoftwareSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SoftwareSurface {
            target: Bitmap::new(width, height),
            state: DrawState::default(),
            stack: Vec::new(),
        }
    }

    /// The rendered pixels.
    pub fn bitmap(&self) -> &Bitmap {
        &self.target
    }

    /// Depth of the save stack (balanced save/restore leaves this at 0).
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        if x < 0 || y < 0 || x >= self.target.width as i64 || y >= self.target.height as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let dst = self.target.pixel(x, y);
        let a = alpha.min(1.0);
        let inv = 1.0 - a;
        let dr = (dst & 0xff) as f32;
        let dg = ((dst >> 8) & 0xff) as f32;
        let db = ((dst >> 16) & 0xff) as f32;
        let da = ((dst >> 24) & 0xff) as f32 / 255.0;
        let r = (color.r as f32 * a + dr * inv) as u32;
        let g = (color.g as f32 * a + dg * inv) as u32;
        let b = (color.b as f32 * a + db * inv) as u32;
        let out_a = ((a + da * inv) * 255.0) as u32;
        self.target
            .set_pixel(x, y, out_a << 24 | b << 16 | g << 8 | r);
    }
}

impl Surface for SoftwareSurface {
    fn width(&self) -> u32 {
        self.target.width
    }

    fn height(&self) -> u32 {
        self.target.height
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha.clamp(0.0, 1.0);
    }

    fn global_alpha(&self) -> f32 {
        self.state.alpha
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let (alpha, fill) = (self.state.alpha, self.state.fill);
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let x1 = (x + w).ceil() as i64;
        let y1 = (y + h).ceil() as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, fill, alpha);
            }
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let (alpha, stroke) = (self.state.alpha, self.state.stroke);
        // Plot one point per destination pixel of arc length.
        let steps = ((radius * std::f32::consts::TAU).ceil() as usize).max(8);
        for i in 0..steps {
            let theta = i as f32 / steps as f32 * std::f32::consts::TAU;
            let px = (cx + theta.cos() * radius).round() as i64;
            let py = (cy + theta.sin() * radius).round() as i64;
            self.blend_pixel(px, py, stroke, alpha);
        }
    }

    fn blit(&mut self, bitmap: &Bitmap, x: f32, y: f32) {
        let alpha = self.state.alpha;
        let ox = x.round() as i64;
        let oy = y.round() as i64;
        for sy in 0..bitmap.height() {
            for sx in 0..bitmap.width() {
                let p = bitmap.pixel(sx, sy);
                let pa = ((p >> 24) & 0xff) as f32 / 255.0;
                if pa <= 0.0 {
                    continue;
                }
                let color = Color::rgb((p & 0xff) as u8, ((p >> 8) & 0xff) as u8, ((p >> 16) & 0xff) as u8);
                self.blend_pixel(ox + sx as i64, oy + sy as i64, color, pa * alpha);
            }
        }
    }
}
