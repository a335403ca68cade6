//! Visual effects: particles, the effect hub, sprint trails, and death
//! sequencing.

mod death;
mod manager;
mod particle;
mod rng;
mod speed;
mod table;

pub use death::{DeathEffect, DeathPhase};
pub use manager::{EffectId, EffectManager, GameEffect, Ring, PARTICLE_BUDGET};
pub use particle::{
    create_radial_particles, create_rising_particles, draw_particles, update_particles, Particle,
    MIN_PARTICLE_SIZE,
};
pub use rng::Rng;
pub use speed::{
    is_speed_effect_active, AfterImage, DashDust, Direction, SpeedEffectManager,
    SPEED_EFFECT_THRESHOLD,
};
pub use table::{EffectKind, EffectShape, EffectSpec};
