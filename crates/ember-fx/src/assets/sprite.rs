//! Sprite art data: indexed-pixel definitions, registered handles, and
//! time-driven animation sheets.

use crate::renderer::color::Color;

/// Opaque identity handle for a registered sprite definition.
/// Assigned once by `SpriteRegistry` and stable for the program's lifetime,
/// so render-cache keys built from it never collide across definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Immutable indexed-pixel sprite art. Palette index 0 is transparent;
/// every other index selects a palette color. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct SpriteDefinition {
    width: u32,
    height: u32,
    grid: Vec<u8>,
    palette: Vec<Color>,
}

impl SpriteDefinition {
    /// Build from a row-major index grid. Rows shorter than `width` are
    /// padded with transparency; excess entries are ignored.
    pub fn new(width: u32, height: u32, rows: &[Vec<u8>], palette: Vec<Color>) -> Self {
        let mut grid = vec![0u8; (width * height) as usize];
        for (y, row) in rows.iter().take(height as usize).enumerate() {
            for (x, &idx) in row.iter().take(width as usize).enumerate() {
                grid[y * width as usize + x] = idx;
            }
        }
        SpriteDefinition {
            width,
            height,
            grid,
            palette,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index at (x, y).
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.grid[(y * self.width + x) as usize]
    }

    /// Color at (x, y), or None for transparency (index 0 or an index
    /// beyond the palette).
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        let idx = self.index_at(x, y);
        if idx == 0 {
            return None;
        }
        self.palette.get(idx as usize - 1).copied()
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }
}

/// A sprite definition together with its registration-time identity.
/// This is what draw calls take; the renderer keys its bitmap cache on
/// `(id, scale)`.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pub def: SpriteDefinition,
}

/// An ordered list of sprite frames with a fixed per-frame duration.
/// Frame selection is a pure function of the caller's clock, so animation
/// is stateless and restartable.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub frames: Vec<Sprite>,
    pub frame_duration_ms: f64,
}

impl SpriteSheet {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frame to show at `now_ms`, or None for an empty sheet.
    pub fn frame_at(&self, now_ms: f64) -> Option<&Sprite> {
        let idx = frame_index(now_ms, self.frames.len(), self.frame_duration_ms);
        self.frames.get(idx)
    }
}

/// Wall-clock frame selection: `floor(now / duration) mod count`.
/// Total over degenerate inputs — zero frames or a non-positive duration
/// yield frame 0.
pub fn frame_index(now_ms: f64, frame_count: usize, frame_duration_ms: f64) -> usize {
    if frame_count == 0 || frame_duration_ms <= 0.0 {
        return 0;
    }
    ((now_ms / frame_duration_ms).floor() as u64 % frame_count as u64) as usize
}
