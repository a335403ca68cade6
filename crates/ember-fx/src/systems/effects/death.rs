//! Player death sequencing: blink, red shift, decompose.
//!
//! A timestamp-driven state machine with no timers or callbacks — the
//! phase is always recomputed from `now - start`, so any injected clock
//! replays the same sequence.

use super::particle::{draw_particles, update_particles, Particle};
use super::rng::Rng;
use crate::renderer::color::Color;
use crate::renderer::surface::Surface;
use glam::Vec2;

const BLINK_END_MS: f64 = 500.0;
const RED_SHIFT_END_MS: f64 = 1000.0;
const DECOMPOSE_END_MS: f64 = 1500.0;
/// Sprite visibility toggles every 100ms during the blink phase.
const BLINK_INTERVAL_MS: f64 = 100.0;
/// Peak opacity of the red overlay at the end of the red-shift phase.
const RED_SHIFT_PEAK_ALPHA: f32 = 0.8;
const BURST_COUNT: usize = 14;
const BURST_GRAVITY: f32 = 150.0;
const BURST_DECAY: f32 = 2.0;

/// Phase of the death sequence, purely a function of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathPhase {
    Blink,
    RedShift,
    Decompose,
    Done,
}

/// Controller for one actor's death sequence.
pub struct DeathEffect {
    start_time: Option<f64>,
    active: bool,
    particles: Vec<Particle>,
    burst_spawned: bool,
    last_update: Option<f64>,
    rng: Rng,
}

impl DeathEffect {
    pub fn new(seed: u64) -> Self {
        Self {
            start_time: None,
            active: false,
            particles: Vec::new(),
            burst_spawned: false,
            last_update: None,
            rng: Rng::new(seed.wrapping_add(31337)),
        }
    }

    /// Begin the sequence at `now`. Resets any prior run.
    pub fn start(&mut self, now_ms: f64) {
        self.start_time = Some(now_ms);
        self.active = true;
        self.particles.clear();
        self.burst_spawned = false;
        self.last_update = Some(now_ms);
    }

    /// Forcibly clear all state (death aborted, e.g. retry).
    pub fn reset(&mut self) {
        self.start_time = None;
        self.active = false;
        self.particles.clear();
        self.burst_spawned = false;
        self.last_update = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current phase at `now`. Done when inactive or never started.
    pub fn phase(&self, now_ms: f64) -> DeathPhase {
        let Some(start) = self.start_time else {
            return DeathPhase::Done;
        };
        if !self.active {
            return DeathPhase::Done;
        }
        let elapsed = now_ms - start;
        if elapsed < BLINK_END_MS {
            DeathPhase::Blink
        } else if elapsed < RED_SHIFT_END_MS {
            DeathPhase::RedShift
        } else if elapsed < DECOMPOSE_END_MS {
            DeathPhase::Decompose
        } else {
            DeathPhase::Done
        }
    }

    /// Advance the sequence. Spawns the decompose burst exactly once from
    /// the player's last screen position and auto-deactivates past the end.
    pub fn update(&mut self, now_ms: f64, x: f32, y: f32, colors: &[Color]) {
        if !self.active {
            return;
        }
        let dt = self
            .last_update
            .map(|last| ((now_ms - last) / 1000.0).max(0.0) as f32)
            .unwrap_or(0.0);
        self.last_update = Some(now_ms);

        let phase = self.phase(now_ms);
        if phase == DeathPhase::Done {
            self.active = false;
            self.particles.clear();
            return;
        }

        let particles = std::mem::take(&mut self.particles);
        self.particles = update_particles(particles, dt, BURST_GRAVITY);

        // Spawn after integrating so a fresh burst never absorbs the dt
        // that elapsed before this phase began.
        if phase == DeathPhase::Decompose && !self.burst_spawned && !colors.is_empty() {
            self.particles = self.spawn_burst(x, y, colors);
            self.burst_spawned = true;
        }
    }

    /// Radial burst with a wider jitter than the generic generator and an
    /// upward kick, so the decompose scatter reads as a collapse.
    fn spawn_burst(&mut self, x: f32, y: f32, colors: &[Color]) -> Vec<Particle> {
        let mut particles = Vec::with_capacity(BURST_COUNT);
        for i in 0..BURST_COUNT {
            let base = i as f32 / BURST_COUNT as f32 * std::f32::consts::TAU;
            let angle = base + self.rng.range_f32(-0.4, 0.4);
            let speed = self.rng.range_f32(40.0, 120.0);
            let mut vel = Vec2::new(angle.cos() * speed, angle.sin() * speed);
            vel.y -= self.rng.range_f32(20.0, 60.0);
            particles.push(Particle {
                pos: Vec2::new(x, y),
                vel,
                size: self.rng.range_f32(2.0, 4.0),
                color: *self.rng.pick(colors),
                alpha: 1.0,
                life: 1.0,
                decay: BURST_DECAY,
            });
        }
        particles
    }

    /// Whether the renderer should draw the player sprite right now.
    /// True when no sequence is running.
    pub fn is_player_visible(&self, now_ms: f64) -> bool {
        match self.phase(now_ms) {
            DeathPhase::Blink => {
                let elapsed = now_ms - self.start_time.unwrap_or(now_ms);
                (elapsed / BLINK_INTERVAL_MS).floor() as i64 % 2 == 0
            }
            DeathPhase::RedShift => true,
            DeathPhase::Decompose => false,
            DeathPhase::Done => true,
        }
    }

    /// Red overlay opacity: 0 outside the red-shift phase, lerped 0→0.8
    /// across it.
    pub fn red_shift_alpha(&self, now_ms: f64) -> f32 {
        if self.phase(now_ms) != DeathPhase::RedShift {
            return 0.0;
        }
        let elapsed = now_ms - self.start_time.unwrap_or(now_ms);
        let t = ((elapsed - BLINK_END_MS) / (RED_SHIFT_END_MS - BLINK_END_MS)).clamp(0.0, 1.0);
        t as f32 * RED_SHIFT_PEAK_ALPHA
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Draw whatever the current phase calls for: the red overlay square
    /// during red shift, the particle scatter during decompose.
    pub fn draw(&self, ctx: &mut dyn Surface, now_ms: f64, x: f32, y: f32, sprite_size: f32) {
        match self.phase(now_ms) {
            DeathPhase::RedShift => {
                let alpha = self.red_shift_alpha(now_ms);
                if alpha > 0.0 {
                    ctx.save();
                    ctx.set_global_alpha(alpha);
                    ctx.set_fill_color(Color::RED);
                    ctx.fill_rect(x, y, sprite_size, sprite_size);
                    ctx.restore();
                }
            }
            DeathPhase::Decompose => {
                draw_particles(ctx, &self.particles, 0.0, 0.0);
            }
            DeathPhase::Blink | DeathPhase::Done => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [Color; 2] = [Color::rgb(80, 120, 200), Color::WHITE];

    #[test]
    fn phase_boundaries() {
        let mut fx = DeathEffect::new(42);
        fx.start(10_000.0);
        assert_eq!(fx.phase(10_000.0), DeathPhase::Blink);
        assert_eq!(fx.phase(10_499.0), DeathPhase::Blink);
        assert_eq!(fx.phase(10_500.0), DeathPhase::RedShift);
        assert_eq!(fx.phase(10_999.0), DeathPhase::RedShift);
        assert_eq!(fx.phase(11_000.0), DeathPhase::Decompose);
        assert_eq!(fx.phase(11_500.0), DeathPhase::Done);
    }

    #[test]
    fn inactive_until_started() {
        let fx = DeathEffect::new(42);
        assert!(!fx.is_active());
        assert_eq!(fx.phase(0.0), DeathPhase::Done);
        assert!(fx.is_player_visible(0.0));
    }

    #[test]
    fn blink_toggles_every_100ms() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        assert!(fx.is_player_visible(0.0));
        assert!(fx.is_player_visible(99.0));
        assert!(!fx.is_player_visible(100.0));
        assert!(fx.is_player_visible(200.0));
        assert!(!fx.is_player_visible(300.0));
    }

    #[test]
    fn player_hidden_during_decompose_visible_after() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        assert!(fx.is_player_visible(700.0)); // red shift: always visible
        assert!(!fx.is_player_visible(1100.0)); // decompose: hidden
        fx.update(1600.0, 0.0, 0.0, &PALETTE);
        assert!(fx.is_player_visible(1600.0)); // done: back to normal
    }

    #[test]
    fn red_shift_alpha_lerps_to_peak() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        assert_eq!(fx.red_shift_alpha(400.0), 0.0);
        assert!((fx.red_shift_alpha(500.0) - 0.0).abs() < 1e-6);
        assert!((fx.red_shift_alpha(750.0) - 0.4).abs() < 1e-4);
        assert!((fx.red_shift_alpha(999.0) - 0.8).abs() < 2e-3);
        assert_eq!(fx.red_shift_alpha(1100.0), 0.0);
    }

    #[test]
    fn burst_spawns_exactly_once() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        fx.update(1050.0, 64.0, 64.0, &PALETTE);
        assert_eq!(fx.particle_count(), 14);
        // Particles decay across subsequent updates but no respawn happens.
        fx.update(1100.0, 64.0, 64.0, &PALETTE);
        assert!(fx.particle_count() <= 14);
        assert!(fx.particle_count() > 0);
    }

    #[test]
    fn auto_deactivates_past_the_end() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        fx.update(1050.0, 0.0, 0.0, &PALETTE);
        assert!(fx.is_active());
        fx.update(1500.0, 0.0, 0.0, &PALETTE);
        assert!(!fx.is_active());
        assert_eq!(fx.particle_count(), 0);
    }

    #[test]
    fn reset_aborts_mid_sequence() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        fx.update(1050.0, 0.0, 0.0, &PALETTE);
        fx.reset();
        assert!(!fx.is_active());
        assert_eq!(fx.phase(1100.0), DeathPhase::Done);
        assert_eq!(fx.particle_count(), 0);
        assert!(fx.is_player_visible(1100.0));
    }

    #[test]
    fn restart_replays_from_blink() {
        let mut fx = DeathEffect::new(42);
        fx.start(0.0);
        fx.update(1600.0, 0.0, 0.0, &PALETTE);
        assert!(!fx.is_active());
        fx.start(2000.0);
        assert_eq!(fx.phase(2000.0), DeathPhase::Blink);
        assert!(fx.is_active());
    }
}
