//! Sprint feedback: motion after-images and a ground-dust trail.
//!
//! Driven once per simulation tick by `record_position`. After-images are a
//! bounded ring of past poses with a fixed positional alpha schedule — the
//! look is always "three fixed-brightness ghosts", not individually fading
//! ones. Dust is a lighter particle than the generic effect particle: no
//! decay rate, just a fixed per-tick life decrement.

use glam::Vec2;

use super::rng::Rng;
use crate::assets::sprite::Sprite;
use crate::renderer::color::Color;
use crate::renderer::sprite::SpriteRenderer;
use crate::renderer::surface::Surface;

/// Effective speed (px/s) at or above which sprint visuals activate.
/// The movement subsystem owns this number; it is consumed here.
pub const SPEED_EFFECT_THRESHOLD: f32 = 220.0;

const MAX_AFTER_IMAGES: usize = 3;
const MAX_DUST: usize = 6;
/// Newest-to-oldest ghost brightness.
const AFTER_IMAGE_ALPHAS: [f32; 3] = [0.5, 0.3, 0.1];
/// Per-call fade applied when sprinting stops, instead of a hard cut.
const FADE_OUT_STEP: f32 = 0.03;
/// Fixed per-tick dust life loss (~18 ticks, about 0.3s at the sim rate).
const DUST_LIFE_STEP: f32 = 0.055;
/// Dust spawns near the feet, below the sprite anchor.
const FEET_OFFSET: f32 = 10.0;

/// Pure sprint predicate.
pub fn is_speed_effect_active(effective_speed: f32) -> bool {
    effective_speed >= SPEED_EFFECT_THRESHOLD
}

/// Cardinal facing of a recorded pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector of the facing.
    pub fn vec(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// A recorded past player pose, rendered as a translucent ghost.
#[derive(Debug, Clone)]
pub struct AfterImage {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub alpha: f32,
    /// Animation frame that was showing when the pose was captured.
    pub sprite_index: usize,
}

/// One fleck of ground dust.
#[derive(Debug, Clone)]
pub struct DashDust {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
    pub life: f32,
}

/// Owns the after-image ring and dust trail for one moving actor.
pub struct SpeedEffectManager {
    after_images: Vec<AfterImage>,
    dust: Vec<DashDust>,
    last_pos: Option<Vec2>,
    rng: Rng,
}

impl SpeedEffectManager {
    pub fn new(seed: u64) -> Self {
        Self {
            after_images: Vec::with_capacity(MAX_AFTER_IMAGES),
            dust: Vec::with_capacity(MAX_DUST),
            last_pos: None,
            rng: Rng::new(seed.wrapping_add(104729)),
        }
    }

    /// Feed one simulation tick of player state.
    ///
    /// Dust always advances first. When inactive, existing ghosts fade out
    /// gradually. When active and the position actually moved, the previous
    /// position becomes the newest ghost and 1–2 dust flecks spawn at the
    /// feet, kicked opposite the movement direction.
    pub fn record_position(
        &mut self,
        x: f32,
        y: f32,
        direction: Direction,
        is_active: bool,
        sprite_index: usize,
    ) {
        self.dust.retain_mut(|d| {
            d.pos += d.vel;
            d.life -= DUST_LIFE_STEP;
            d.life > 0.0
        });

        let pos = Vec2::new(x, y);
        if !is_active {
            self.after_images.retain_mut(|img| {
                img.alpha -= FADE_OUT_STEP;
                img.alpha > 0.0
            });
        } else if self.last_pos.is_some_and(|last| last != pos) {
            let last = self.last_pos.unwrap();
            self.after_images.insert(
                0,
                AfterImage {
                    x: last.x,
                    y: last.y,
                    direction,
                    alpha: AFTER_IMAGE_ALPHAS[0],
                    sprite_index,
                },
            );
            self.after_images.truncate(MAX_AFTER_IMAGES);
            for (img, &alpha) in self.after_images.iter_mut().zip(&AFTER_IMAGE_ALPHAS) {
                img.alpha = alpha;
            }
            self.spawn_dust(pos, direction);
        }
        self.last_pos = Some(pos);
    }

    fn spawn_dust(&mut self, pos: Vec2, direction: Direction) {
        let back = -direction.vec();
        let count = 1 + self.rng.next_int(2) as usize;
        for _ in 0..count {
            let jitter = Vec2::new(self.rng.range_f32(-3.0, 3.0), self.rng.range_f32(-2.0, 2.0));
            self.dust.push(DashDust {
                pos: pos + Vec2::new(0.0, FEET_OFFSET) + back * self.rng.range_f32(2.0, 6.0) + jitter,
                vel: back * self.rng.range_f32(0.3, 1.2) + Vec2::new(0.0, self.rng.range_f32(-0.3, 0.1)),
                size: self.rng.range_f32(1.5, 3.5),
                alpha: self.rng.range_f32(0.4, 0.8),
                life: 1.0,
            });
            if self.dust.len() > MAX_DUST {
                self.dust.remove(0);
            }
        }
    }

    /// Draw the ghosts through the sprite renderer, oldest first so the
    /// newest lands on top. `resolve` maps a recorded pose to the character
    /// frame it should ghost; poses it cannot resolve are skipped.
    pub fn draw_after_images<'a, F>(
        &self,
        ctx: &mut dyn Surface,
        renderer: &mut SpriteRenderer,
        resolve: F,
        scale: f32,
    ) where
        F: Fn(Direction, usize) -> Option<&'a Sprite>,
    {
        for img in self.after_images.iter().rev() {
            if let Some(sprite) = resolve(img.direction, img.sprite_index) {
                renderer.draw_sprite_with_alpha(ctx, sprite, img.x, img.y, scale, img.alpha);
            }
        }
    }

    /// Draw the dust trail as flat brown flecks fading with remaining life.
    pub fn draw_dash_dust(&self, ctx: &mut dyn Surface) {
        ctx.save();
        ctx.set_fill_color(Color::DUST_BROWN);
        for d in &self.dust {
            ctx.set_global_alpha((d.alpha * d.life).max(0.0));
            let half = d.size / 2.0;
            ctx.fill_rect(d.pos.x - half, d.pos.y - half, d.size, d.size);
        }
        ctx.restore();
    }

    pub fn has_visible_effects(&self) -> bool {
        !self.after_images.is_empty() || !self.dust.is_empty()
    }

    pub fn after_image_count(&self) -> usize {
        self.after_images.len()
    }

    pub fn dust_count(&self) -> usize {
        self.dust.len()
    }

    /// Newest-first ghost list.
    pub fn after_images(&self) -> &[AfterImage] {
        &self.after_images
    }

    /// Drop all ghosts and dust (scene transitions).
    pub fn clear(&mut self) {
        self.after_images.clear();
        self.dust.clear();
        self.last_pos = None;
    }
}
