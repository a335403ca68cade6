//! The effect orchestration hub.
//!
//! Game code reports "effect X fired at (x, y)" and the manager owns the
//! rest: per-kind particle batches, effect lifetimes, ring and flash
//! overlays, and a hard global particle budget enforced by evicting the
//! oldest live effect.

use super::particle::{
    create_radial_particles, create_rising_particles, draw_particles, update_particles, Particle,
};
use super::rng::Rng;
use super::table::{EffectKind, EffectShape};
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;

/// Hard upper bound on live particles across all effects.
pub const PARTICLE_BUDGET: usize = 200;

/// Screen-flash fade window, independent of the owning effect's duration.
const FLASH_FADE_MS: f64 = 200.0;

/// Peak opacity of the boss-kill screen flash.
const FLASH_PEAK_ALPHA: f32 = 0.6;

/// Unique handle for one spawned effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectId(pub u64);

/// Expanding circle overlay (level-up, teleport traps).
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    pub radius: f32,
    pub max_radius: f32,
}

/// One active visual event and everything it owns.
#[derive(Debug)]
pub struct GameEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub start_time: f64,
    pub duration_ms: f64,
    pub particles: Vec<Particle>,
    pub ring: Option<Ring>,
    pub flash_alpha: f32,
    /// Lifetime fraction in [0, 1] as of the last update.
    pub progress: f32,
}

/// Owns every live effect, insertion-ordered oldest first.
pub struct EffectManager {
    effects: Vec<GameEffect>,
    next_id: u64,
    rng: Rng,
}

impl EffectManager {
    pub fn new(seed: u64) -> Self {
        Self {
            effects: Vec::new(),
            next_id: 0,
            rng: Rng::new(seed.wrapping_add(7919)),
        }
    }

    /// Spawn an effect of `kind` anchored at screen position (x, y).
    /// Enforces the particle budget afterwards.
    pub fn add_effect(&mut self, kind: EffectKind, x: f32, y: f32, now_ms: f64) -> EffectId {
        let spec = kind.spec();
        let particles = match spec.shape {
            EffectShape::Radial { speed_min, speed_max } => create_radial_particles(
                &mut self.rng,
                spec.count,
                x,
                y,
                spec.colors,
                speed_min,
                speed_max,
                spec.size_min,
                spec.size_max,
                spec.decay,
            ),
            EffectShape::Rising => create_rising_particles(
                &mut self.rng,
                spec.count,
                x,
                y,
                spec.colors,
                spec.size_min,
                spec.size_max,
                spec.decay,
            ),
        };

        let id = EffectId(self.next_id);
        self.next_id += 1;
        self.effects.push(GameEffect {
            id,
            kind,
            x,
            y,
            start_time: now_ms,
            duration_ms: spec.duration_ms,
            particles,
            ring: spec.ring_max_radius.map(|max_radius| Ring {
                radius: 0.0,
                max_radius,
            }),
            flash_alpha: if spec.flash { 1.0 } else { 0.0 },
            progress: 0.0,
        });

        self.enforce_budget();
        id
    }

    /// Spawn from a raw trigger code. Unknown codes are silently dropped —
    /// unknown events are not fatal, they just produce no effect.
    pub fn add_effect_code(&mut self, code: u8, x: f32, y: f32, now_ms: f64) -> Option<EffectId> {
        EffectKind::from_u8(code).map(|kind| self.add_effect(kind, x, y, now_ms))
    }

    /// While the budget is exceeded and more than one effect remains, evict
    /// the oldest. Deterministic and age-ordered: a caller burst truncates
    /// the oldest ongoing visuals first, never random ones.
    fn enforce_budget(&mut self) {
        let mut total: usize = self.effects.iter().map(|e| e.particles.len()).sum();
        while total > PARTICLE_BUDGET && self.effects.len() > 1 {
            let evicted = self.effects.remove(0);
            total -= evicted.particles.len();
            log::debug!(
                "particle budget exceeded, evicted effect {:?} ({:?}, {} particles)",
                evicted.id,
                evicted.kind,
                evicted.particles.len()
            );
        }
    }

    /// Advance every effect by `dt` seconds at caller time `now_ms`.
    /// Effects past their duration are dropped; dropping is idempotent.
    pub fn update(&mut self, dt: f32, now_ms: f64) {
        self.effects.retain_mut(|effect| {
            let elapsed = now_ms - effect.start_time;
            if elapsed > effect.duration_ms {
                return false;
            }
            effect.progress = (elapsed / effect.duration_ms).clamp(0.0, 1.0) as f32;

            let gravity = effect.kind.spec().gravity;
            let particles = std::mem::take(&mut effect.particles);
            effect.particles = update_particles(particles, dt.max(0.0), gravity);

            if let Some(ring) = &mut effect.ring {
                ring.radius = effect.progress * ring.max_radius;
            }
            if effect.kind.spec().flash {
                effect.flash_alpha = (1.0 - elapsed / FLASH_FADE_MS).max(0.0) as f32;
            }
            true
        });
    }

    /// Draw all effects: particles first, then ring overlays, then any
    /// full-screen flash.
    pub fn draw(&self, ctx: &mut dyn Surface, width: f32, height: f32) {
        for effect in &self.effects {
            draw_particles(ctx, &effect.particles, 0.0, 0.0);
        }

        for effect in &self.effects {
            let Some(ring) = &effect.ring else { continue };
            if ring.radius <= 0.0 {
                continue;
            }
            let color = if effect.kind == EffectKind::LevelUp {
                Color::GOLD
            } else {
                Color::VIOLET
            };
            ctx.save();
            ctx.set_global_alpha((1.0 - effect.progress).max(0.0));
            ctx.set_stroke_color(color);
            ctx.stroke_circle(effect.x, effect.y, ring.radius);
            ctx.restore();
        }

        for effect in &self.effects {
            if effect.flash_alpha <= 0.0 {
                continue;
            }
            ctx.save();
            ctx.set_global_alpha(effect.flash_alpha * FLASH_PEAK_ALPHA);
            ctx.set_fill_color(Color::WHITE);
            ctx.fill_rect(0.0, 0.0, width, height);
            ctx.restore();
        }
    }

    /// Drop every effect (scene transitions).
    pub fn clear(&mut self) {
        log::debug!("clearing {} effects", self.effects.len());
        self.effects.clear();
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn total_particle_count(&self) -> usize {
        self.effects.iter().map(|e| e.particles.len()).sum()
    }

    /// Look up a live effect by id.
    pub fn get(&self, id: EffectId) -> Option<&GameEffect> {
        self.effects.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::SoftwareSurface;

    #[test]
    fn per_kind_particle_counts_match_table() {
        for kind in EffectKind::ALL {
            let mut mgr = EffectManager::new(42);
            mgr.add_effect(kind, 0.0, 0.0, 0.0);
            assert_eq!(mgr.total_particle_count(), kind.spec().count, "{kind:?}");
        }
    }

    #[test]
    fn effect_expires_exactly_once() {
        let mut mgr = EffectManager::new(42);
        mgr.add_effect(EffectKind::AttackHit, 10.0, 10.0, 1000.0);
        assert_eq!(mgr.effect_count(), 1);

        mgr.update(0.1, 5000.0);
        assert_eq!(mgr.effect_count(), 0);
        // Second update with the same time is a no-op.
        mgr.update(0.1, 5000.0);
        assert_eq!(mgr.effect_count(), 0);
    }

    #[test]
    fn effect_survives_within_duration() {
        let mut mgr = EffectManager::new(42);
        mgr.add_effect(EffectKind::BossKill, 0.0, 0.0, 1000.0);
        mgr.update(0.1, 2000.0); // elapsed 1000 < 1200
        assert_eq!(mgr.effect_count(), 1);
        mgr.update(0.1, 2201.0); // elapsed 1201 > 1200
        assert_eq!(mgr.effect_count(), 0);
    }

    #[test]
    fn budget_evicts_oldest_first() {
        let mut mgr = EffectManager::new(42);
        // 9 boss kills at 24 particles each = 216 > 200.
        let mut ids = Vec::new();
        for i in 0..9 {
            ids.push(mgr.add_effect(EffectKind::BossKill, 0.0, 0.0, i as f64));
        }
        assert!(mgr.total_particle_count() <= PARTICLE_BUDGET);
        assert_eq!(mgr.effect_count(), 8);
        // The oldest is gone, the rest survive in age order.
        assert!(mgr.get(ids[0]).is_none());
        for id in &ids[1..] {
            assert!(mgr.get(*id).is_some());
        }
    }

    #[test]
    fn budget_never_evicts_the_last_effect() {
        let mut mgr = EffectManager::new(42);
        // A single effect may exceed nothing here, but even under spam the
        // newest always survives.
        for i in 0..50 {
            mgr.add_effect(EffectKind::BossKill, 0.0, 0.0, i as f64);
        }
        assert!(mgr.effect_count() >= 1);
        assert!(mgr.total_particle_count() <= PARTICLE_BUDGET);
    }

    #[test]
    fn unknown_code_is_silently_ignored() {
        let mut mgr = EffectManager::new(42);
        assert_eq!(mgr.add_effect_code(200, 0.0, 0.0, 0.0), None);
        assert_eq!(mgr.effect_count(), 0);
        assert!(mgr.add_effect_code(0, 0.0, 0.0, 0.0).is_some());
        assert_eq!(mgr.effect_count(), 1);
    }

    #[test]
    fn level_up_ring_tracks_progress() {
        let mut mgr = EffectManager::new(42);
        let id = mgr.add_effect(EffectKind::LevelUp, 100.0, 100.0, 1000.0);

        mgr.update(0.4, 1400.0); // elapsed 400 of 800
        let effect = mgr.get(id).expect("effect still live");
        let ring = effect.ring.expect("level-up has a ring");
        assert!((ring.radius - 20.0).abs() < 1e-4, "radius {}", ring.radius);

        mgr.update(0.5, 1900.0); // elapsed 900 > 800
        assert_eq!(mgr.effect_count(), 0);
    }

    #[test]
    fn flash_fades_over_its_own_window() {
        let mut mgr = EffectManager::new(42);
        let id = mgr.add_effect(EffectKind::BossKill, 0.0, 0.0, 0.0);
        mgr.update(0.1, 100.0);
        let half = mgr.get(id).unwrap().flash_alpha;
        assert!((half - 0.5).abs() < 1e-4);
        mgr.update(0.1, 300.0); // past the 200ms window, effect still live
        assert_eq!(mgr.get(id).unwrap().flash_alpha, 0.0);
    }

    #[test]
    fn negative_dt_cannot_resurrect_particles() {
        let mut mgr = EffectManager::new(42);
        mgr.add_effect(EffectKind::AttackHit, 0.0, 0.0, 0.0);
        mgr.update(-1.0, 10.0);
        assert!(mgr.total_particle_count() <= 8);
    }

    #[test]
    fn clear_drops_everything() {
        let mut mgr = EffectManager::new(42);
        mgr.add_effect(EffectKind::Damage, 0.0, 0.0, 0.0);
        mgr.add_effect(EffectKind::LevelUp, 0.0, 0.0, 0.0);
        mgr.clear();
        assert_eq!(mgr.effect_count(), 0);
        assert_eq!(mgr.total_particle_count(), 0);
    }

    #[test]
    fn draw_leaves_surface_state_balanced() {
        let mut mgr = EffectManager::new(42);
        mgr.add_effect(EffectKind::LevelUp, 32.0, 32.0, 0.0);
        mgr.add_effect(EffectKind::BossKill, 32.0, 32.0, 0.0);
        mgr.update(0.05, 50.0);

        let mut ctx = SoftwareSurface::new(64, 64);
        ctx.set_global_alpha(1.0);
        mgr.draw(&mut ctx, 64.0, 64.0);
        assert_eq!(ctx.save_depth(), 0);
        assert_eq!(ctx.global_alpha(), 1.0);
    }
}
