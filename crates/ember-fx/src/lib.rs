//! ember-fx — the visual feedback core for a 2D tile-based action game.
//!
//! Hit sparks, damage bursts, level-up rings, boss-kill flashes, player
//! death sequencing, sprint after-images, and a scale-keyed sprite bitmap
//! cache. Single-threaded and frame-driven: the caller supplies every
//! timestamp and a raster `Surface`, and this crate produces pixels plus
//! read-only counts. No wall clock is ever read internally.

pub mod assets;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use assets::manifest::{ManifestError, SpriteManifest};
pub use assets::registry::SpriteRegistry;
pub use assets::sprite::{frame_index, Sprite, SpriteDefinition, SpriteId, SpriteSheet};
pub use renderer::color::Color;
pub use renderer::sprite::SpriteRenderer;
pub use renderer::surface::{Bitmap, SoftwareSurface, Surface};
pub use systems::effects::{
    create_radial_particles, create_rising_particles, draw_particles, is_speed_effect_active,
    update_particles, AfterImage, DashDust, DeathEffect, DeathPhase, Direction, EffectId,
    EffectKind, EffectManager, EffectShape, EffectSpec, GameEffect, Particle, Ring, Rng,
    SpeedEffectManager, PARTICLE_BUDGET, SPEED_EFFECT_THRESHOLD,
};
