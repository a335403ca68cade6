//! Cached sprite rendering.
//!
//! Rasterizing an indexed-pixel definition and rescaling it is the
//! expensive path, so the renderer does it once per `(sprite id, scale)`
//! pair and blits the cached bitmap thereafter. The cache only grows —
//! sprite/scale cardinality is bounded by the game's fixed art set — and
//! is dropped wholesale by `clear_cache` on resolution changes.

use std::collections::HashMap;

use super::surface::{Bitmap, Surface};
use crate::assets::sprite::{Sprite, SpriteId, SpriteSheet};

pub struct SpriteRenderer {
    cache: HashMap<(SpriteId, u32), Bitmap>,
    rasterizations: usize,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            rasterizations: 0,
        }
    }

    /// Draw a sprite with its top-left corner at (x, y), scaled by `scale`.
    /// Cache miss rasterizes and rescales; cache hit is a single blit.
    pub fn draw_sprite(&mut self, ctx: &mut dyn Surface, sprite: &Sprite, x: f32, y: f32, scale: f32) {
        let key = (sprite.id, scale.to_bits());
        if !self.cache.contains_key(&key) {
            log::trace!("sprite cache miss: id={} scale={}", sprite.id.0, scale);
            let bitmap = Self::rasterize(sprite, scale);
            self.rasterizations += 1;
            self.cache.insert(key, bitmap);
        }
        let bitmap = &self.cache[&key];
        ctx.blit(bitmap, x, y);
    }

    /// Draw the sheet frame selected by `now_ms`. Empty sheets draw nothing.
    pub fn draw_animated_sprite(
        &mut self,
        ctx: &mut dyn Surface,
        sheet: &SpriteSheet,
        now_ms: f64,
        x: f32,
        y: f32,
        scale: f32,
    ) {
        if let Some(frame) = sheet.frame_at(now_ms) {
            self.draw_sprite(ctx, frame, x, y, scale);
        }
    }

    /// Draw a sprite at an explicit alpha, restoring the surface's prior
    /// global alpha afterwards.
    pub fn draw_sprite_with_alpha(
        &mut self,
        ctx: &mut dyn Surface,
        sprite: &Sprite,
        x: f32,
        y: f32,
        scale: f32,
        alpha: f32,
    ) {
        let prev = ctx.global_alpha();
        ctx.set_global_alpha(alpha);
        self.draw_sprite(ctx, sprite, x, y, scale);
        ctx.set_global_alpha(prev);
    }

    /// Drop every cached bitmap.
    pub fn clear_cache(&mut self) {
        log::debug!("sprite cache cleared ({} entries)", self.cache.len());
        self.cache.clear();
    }

    /// Number of cached bitmaps.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Total rasterizations performed (cache misses since construction).
    pub fn rasterization_count(&self) -> usize {
        self.rasterizations
    }

    /// Rasterize at native size (index 0 transparent, others opaque
    /// palette colors), then nearest-neighbor rescale.
    fn rasterize(sprite: &Sprite, scale: f32) -> Bitmap {
        let def = &sprite.def;
        let mut native = Bitmap::new(def.width().max(1), def.height().max(1));
        for y in 0..def.height() {
            for x in 0..def.width() {
                if let Some(color) = def.color_at(x, y) {
                    native.set_pixel(x, y, color.packed(255));
                }
            }
        }
        if scale == 1.0 {
            native
        } else {
            native.scaled_nearest(scale)
        }
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new()
    }
}
