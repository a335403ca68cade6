//! The particle primitive and its pure generate/update/draw functions.
//!
//! Nothing here owns storage: generators return fresh batches, the update
//! consumes and returns a batch, and drawing only reads. Owning collections
//! (effects, the death burst, dust trails) live with their managers.

use glam::Vec2;

use super::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Size floor a shrinking particle never drops below.
pub const MIN_PARTICLE_SIZE: f32 = 0.5;

/// A moving, fading, shrinking point. Alive iff `life > 0`; alpha always
/// tracks `life.max(0)`.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: Color,
    pub alpha: f32,
    /// Normalized remaining life in [0, 1].
    pub life: f32,
    /// Life lost per second.
    pub decay: f32,
}

/// Spawn `count` particles evenly distributed around a circle, each with a
/// ±0.3 rad angular jitter and a random speed, size, and palette color.
/// Hit sparks, boss-kill bursts, trap bursts.
#[allow(clippy::too_many_arguments)]
pub fn create_radial_particles(
    rng: &mut Rng,
    count: usize,
    x: f32,
    y: f32,
    colors: &[Color],
    speed_min: f32,
    speed_max: f32,
    size_min: f32,
    size_max: f32,
    decay: f32,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for i in 0..count {
        let base = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
        let angle = base + rng.range_f32(-0.3, 0.3);
        let speed = rng.range_f32(speed_min, speed_max);
        particles.push(Particle {
            pos: Vec2::new(x, y),
            vel: Vec2::new(angle.cos() * speed, angle.sin() * speed),
            size: rng.range_f32(size_min, size_max),
            color: *rng.pick(colors),
            alpha: 1.0,
            life: 1.0,
            decay,
        });
    }
    particles
}

/// Spawn `count` particles drifting upward from the anchor, with a small
/// horizontal jitter. Damage motes, item pickups, level-up motes.
pub fn create_rising_particles(
    rng: &mut Rng,
    count: usize,
    x: f32,
    y: f32,
    colors: &[Color],
    size_min: f32,
    size_max: f32,
    decay: f32,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(count);
    for _ in 0..count {
        particles.push(Particle {
            pos: Vec2::new(x + rng.range_f32(-8.0, 8.0), y),
            vel: Vec2::new(rng.range_f32(-20.0, 20.0), rng.range_f32(-80.0, -30.0)),
            size: rng.range_f32(size_min, size_max),
            color: *rng.pick(colors),
            alpha: 1.0,
            life: 1.0,
            decay,
        });
    }
    particles
}

/// Advance a batch by `dt` seconds under optional gravity. Functional
/// update: consumes the batch and returns the survivors, so there is no
/// side channel for a caller to miss.
pub fn update_particles(particles: Vec<Particle>, dt: f32, gravity: f32) -> Vec<Particle> {
    particles
        .into_iter()
        .filter_map(|mut p| {
            p.pos += p.vel * dt;
            p.vel.y += gravity * dt;
            p.life -= p.decay * dt;
            if p.life <= 0.0 {
                return None;
            }
            p.alpha = p.life.max(0.0);
            p.size = (p.size * (0.98 + 0.02 * p.life)).max(MIN_PARTICLE_SIZE);
            Some(p)
        })
        .collect()
}

/// Draw a batch as filled squares centered on each particle (intentional
/// pixel-art styling, not circles). Scoped save/restore keeps the alpha
/// from leaking into later draws.
pub fn draw_particles(ctx: &mut dyn Surface, particles: &[Particle], offset_x: f32, offset_y: f32) {
    ctx.save();
    for p in particles {
        if p.alpha <= 0.0 {
            continue;
        }
        ctx.set_global_alpha(p.alpha);
        ctx.set_fill_color(p.color);
        let half = p.size / 2.0;
        ctx.fill_rect(
            p.pos.x + offset_x - half,
            p.pos.y + offset_y - half,
            p.size,
            p.size,
        );
    }
    ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::SoftwareSurface;

    const PALETTE: [Color; 2] = [Color::RED, Color::WHITE];

    #[test]
    fn radial_batch_size_is_exact() {
        let mut rng = Rng::new(42);
        for count in [0, 1, 8, 24] {
            let batch =
                create_radial_particles(&mut rng, count, 0.0, 0.0, &PALETTE, 60.0, 150.0, 2.0, 4.0, 3.0);
            assert_eq!(batch.len(), count);
        }
    }

    #[test]
    fn rising_batch_size_is_exact() {
        let mut rng = Rng::new(42);
        let batch = create_rising_particles(&mut rng, 6, 50.0, 50.0, &PALETTE, 2.0, 4.0, 2.5);
        assert_eq!(batch.len(), 6);
        for p in &batch {
            assert!(p.vel.y <= -30.0 && p.vel.y >= -80.0);
            assert!((p.pos.x - 50.0).abs() <= 8.0);
            assert_eq!(p.life, 1.0);
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn life_strictly_decreases_until_removal() {
        let mut rng = Rng::new(42);
        let mut batch = create_radial_particles(&mut rng, 4, 0.0, 0.0, &PALETTE, 10.0, 20.0, 2.0, 4.0, 2.0);
        let mut prev_life = 1.0;
        for _ in 0..10 {
            batch = update_particles(batch, 0.1, 0.0);
            if let Some(p) = batch.first() {
                assert!(p.life < prev_life);
                prev_life = p.life;
            }
        }
        // decay 2.0 over 1s total: everything dead.
        assert!(batch.is_empty());
    }

    #[test]
    fn alpha_tracks_life_and_size_floors() {
        let mut rng = Rng::new(1);
        let mut batch = create_radial_particles(&mut rng, 1, 0.0, 0.0, &PALETTE, 0.0, 1.0, 0.6, 0.7, 0.5);
        for _ in 0..15 {
            batch = update_particles(batch, 0.1, 0.0);
            for p in &batch {
                assert!((p.alpha - p.life.max(0.0)).abs() < 1e-6);
                assert!(p.size >= MIN_PARTICLE_SIZE);
            }
        }
    }

    #[test]
    fn gravity_pulls_velocity_down() {
        let mut rng = Rng::new(3);
        let batch = create_rising_particles(&mut rng, 1, 0.0, 0.0, &PALETTE, 2.0, 3.0, 0.1);
        let vy_before = batch[0].vel.y;
        let batch = update_particles(batch, 0.5, 120.0);
        assert!(batch[0].vel.y > vy_before);
    }

    #[test]
    fn draw_empty_batch_is_balanced_noop() {
        let mut ctx = SoftwareSurface::new(4, 4);
        ctx.set_global_alpha(0.4);
        draw_particles(&mut ctx, &[], 0.0, 0.0);
        assert_eq!(ctx.save_depth(), 0);
        assert_eq!(ctx.global_alpha(), 0.4);
    }

    #[test]
    fn draw_restores_alpha_after_particles() {
        let mut ctx = SoftwareSurface::new(16, 16);
        ctx.set_global_alpha(1.0);
        let mut rng = Rng::new(5);
        let batch = create_radial_particles(&mut rng, 3, 8.0, 8.0, &PALETTE, 0.0, 1.0, 2.0, 3.0, 1.0);
        draw_particles(&mut ctx, &batch, 0.0, 0.0);
        assert_eq!(ctx.global_alpha(), 1.0);
        assert_eq!(ctx.save_depth(), 0);
    }
}
