//! Effect kinds and their spawn parameters.
//!
//! One static table is the single source of truth for how every effect
//! kind looks: particle shape and count, lifetime, palette, and optional
//! ring/flash overlays. Adding a kind is a data change, not control flow.

use crate::renderer::color::Color;

/// Trigger events the game emits when its rules fire. The engine has no
/// opinion on why one fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EffectKind {
    AttackHit = 0,
    Damage = 1,
    TrapDamage = 2,
    TrapSlow = 3,
    TrapTeleport = 4,
    ItemPickup = 5,
    LevelUp = 6,
    BossKill = 7,
}

impl EffectKind {
    pub const ALL: [EffectKind; 8] = [
        Self::AttackHit,
        Self::Damage,
        Self::TrapDamage,
        Self::TrapSlow,
        Self::TrapTeleport,
        Self::ItemPickup,
        Self::LevelUp,
        Self::BossKill,
    ];

    /// Convert a raw trigger code from the caller boundary.
    /// Unknown codes map to None and are dropped, never an error.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::AttackHit),
            1 => Some(Self::Damage),
            2 => Some(Self::TrapDamage),
            3 => Some(Self::TrapSlow),
            4 => Some(Self::TrapTeleport),
            5 => Some(Self::ItemPickup),
            6 => Some(Self::LevelUp),
            7 => Some(Self::BossKill),
            _ => None,
        }
    }

    /// Spawn parameters for this kind.
    pub fn spec(self) -> &'static EffectSpec {
        &TABLE[self as usize]
    }
}

/// How a kind's particle batch is generated.
#[derive(Debug, Clone, Copy)]
pub enum EffectShape {
    /// Even circular distribution with a random speed per particle.
    Radial { speed_min: f32, speed_max: f32 },
    /// Upward-biased drift from the anchor.
    Rising,
}

/// Everything needed to instantiate one effect kind.
#[derive(Debug)]
pub struct EffectSpec {
    pub shape: EffectShape,
    pub count: usize,
    pub duration_ms: f64,
    pub colors: &'static [Color],
    pub size_min: f32,
    pub size_max: f32,
    pub decay: f32,
    /// Downward acceleration applied to this kind's particles (px/s²).
    pub gravity: f32,
    /// Expanding ring overlay: final radius in px.
    pub ring_max_radius: Option<f32>,
    /// Full-screen white flash overlay.
    pub flash: bool,
}

const SPARK: [Color; 3] = [
    Color::rgb(255, 255, 255),
    Color::rgb(255, 224, 102),
    Color::rgb(255, 170, 0),
];
const BLOOD: [Color; 3] = [
    Color::rgb(255, 68, 68),
    Color::rgb(255, 136, 102),
    Color::rgb(204, 34, 34),
];
const EMBER: [Color; 3] = [
    Color::rgb(255, 140, 0),
    Color::rgb(255, 69, 0),
    Color::rgb(255, 200, 80),
];
const FROST: [Color; 3] = [
    Color::rgb(102, 204, 255),
    Color::rgb(51, 153, 255),
    Color::rgb(204, 238, 255),
];
const ARCANE: [Color; 3] = [
    Color::rgb(186, 85, 211),
    Color::rgb(138, 43, 226),
    Color::rgb(221, 160, 221),
];
const HERB: [Color; 3] = [
    Color::rgb(102, 221, 102),
    Color::rgb(170, 255, 170),
    Color::rgb(255, 255, 255),
];
const RADIANT: [Color; 3] = [
    Color::rgb(255, 215, 0),
    Color::rgb(255, 255, 153),
    Color::rgb(255, 255, 255),
];
const INFERNO: [Color; 4] = [
    Color::rgb(255, 215, 0),
    Color::rgb(255, 140, 0),
    Color::rgb(255, 69, 0),
    Color::rgb(255, 255, 255),
];

/// Indexed by `EffectKind as usize`.
static TABLE: [EffectSpec; 8] = [
    // AttackHit
    EffectSpec {
        shape: EffectShape::Radial { speed_min: 60.0, speed_max: 150.0 },
        count: 8,
        duration_ms: 300.0,
        colors: &SPARK,
        size_min: 2.0,
        size_max: 4.0,
        decay: 3.0,
        gravity: 0.0,
        ring_max_radius: None,
        flash: false,
    },
    // Damage
    EffectSpec {
        shape: EffectShape::Rising,
        count: 6,
        duration_ms: 400.0,
        colors: &BLOOD,
        size_min: 2.0,
        size_max: 4.0,
        decay: 2.5,
        gravity: 120.0,
        ring_max_radius: None,
        flash: false,
    },
    // TrapDamage
    EffectSpec {
        shape: EffectShape::Rising,
        count: 6,
        duration_ms: 350.0,
        colors: &EMBER,
        size_min: 2.0,
        size_max: 3.0,
        decay: 2.8,
        gravity: 120.0,
        ring_max_radius: None,
        flash: false,
    },
    // TrapSlow
    EffectSpec {
        shape: EffectShape::Radial { speed_min: 15.0, speed_max: 40.0 },
        count: 8,
        duration_ms: 500.0,
        colors: &FROST,
        size_min: 3.0,
        size_max: 5.0,
        decay: 2.0,
        gravity: 0.0,
        ring_max_radius: None,
        flash: false,
    },
    // TrapTeleport
    EffectSpec {
        shape: EffectShape::Radial { speed_min: 40.0, speed_max: 100.0 },
        count: 10,
        duration_ms: 400.0,
        colors: &ARCANE,
        size_min: 2.0,
        size_max: 4.0,
        decay: 2.5,
        gravity: 0.0,
        ring_max_radius: Some(30.0),
        flash: false,
    },
    // ItemPickup
    EffectSpec {
        shape: EffectShape::Rising,
        count: 6,
        duration_ms: 500.0,
        colors: &HERB,
        size_min: 2.0,
        size_max: 3.0,
        decay: 2.0,
        gravity: 0.0,
        ring_max_radius: None,
        flash: false,
    },
    // LevelUp
    EffectSpec {
        shape: EffectShape::Rising,
        count: 12,
        duration_ms: 800.0,
        colors: &RADIANT,
        size_min: 2.0,
        size_max: 4.0,
        decay: 1.5,
        gravity: 0.0,
        ring_max_radius: Some(40.0),
        flash: false,
    },
    // BossKill
    EffectSpec {
        shape: EffectShape::Radial { speed_min: 80.0, speed_max: 200.0 },
        count: 24,
        duration_ms: 1200.0,
        colors: &INFERNO,
        size_min: 3.0,
        size_max: 6.0,
        decay: 1.2,
        gravity: 0.0,
        ring_max_radius: None,
        flash: true,
    },
];
