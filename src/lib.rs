//! Astro Raid - A two-stage arcade shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, stages, director, timer)
//! - `assets`: Startup asset resolution (sizes, file checks)
//! - `settings`: Run configuration loaded from JSON
//! - `error`: Startup error types

pub mod assets;
pub mod error;
pub mod settings;
pub mod sim;

pub use assets::{AssetManifest, Assets};
pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
///
/// Time is measured in time units: one unit is one nominal 60 Hz frame.
pub mod consts {
    /// Logical screen size shared by all position math
    pub const WIDTH: f32 = 1280.0;
    pub const HEIGHT: f32 = 720.0;

    /// Milliseconds in one time unit
    pub const MS_PER_UNIT: f32 = 1000.0 / 60.0;

    /// Ship defaults
    pub const SHIP_Y: f32 = 635.0;
    pub const SHIP_SPEED: f32 = 5.0;
    pub const STARTING_AMMO: u32 = 10;

    /// Bullet travels upward; spawned with its left edge this far left of the ship center
    pub const BULLET_SPEED: f32 = 15.0;
    pub const BULLET_X_OFFSET: f32 = 15.0;

    /// Asteroid field
    pub const ASTEROID_COUNT: usize = 10;
    pub const ASTEROID_PADDING: f32 = 50.0;
    /// Lower edge of the spawn band (upper part of the play area)
    pub const ASTEROID_BAND_BOTTOM: f32 = 335.0;
    pub const ASTEROID_SPIN: f32 = 0.05;

    /// Boss patrol
    pub const BOSS_Y: f32 = 200.0;
    pub const BOSS_SPEED: f32 = 5.0;
    pub const BOSS_HIT_POINTS: usize = 4;
    /// Travel accumulated before the boss stops
    pub const BOSS_TRAVEL_TIME: f32 = 100.0;
    /// Pause accumulated before the boss moves again
    pub const BOSS_PAUSE_TIME: f32 = 50.0;

    /// Boss fire
    pub const FIREBALL_SPEED: f32 = 10.0;
    pub const FIREBALL_CADENCE: f32 = 100.0;

    /// Explosions (300 ms at 60 fps)
    pub const EXPLOSION_LIFETIME: f32 = 18.0;
    pub const EXPLOSION_SPIN: f32 = 5.0;

    /// HUD placement
    pub const AMMO_DISPLAY_X: f32 = 50.0;
    pub const AMMO_DISPLAY_Y: f32 = 50.0;

    /// Per-stage time budget
    pub const TIME_LIMIT_MS: u64 = 60_000;
}
