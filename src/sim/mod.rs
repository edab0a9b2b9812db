//! Simulation module
//!
//! All gameplay logic lives here. The rules this module keeps:
//! - Time advances only through `dt` in frame units
//! - Randomness comes from seeded generators owned by stages
//! - Rendering is reached only through the [`Visuals`] seam

pub mod asteroid_stage;
pub mod boss_stage;
pub mod collision;
pub mod director;
pub mod entity;
pub mod stage;
pub mod timer;
pub mod visual;

pub use asteroid_stage::AsteroidStage;
pub use boss_stage::BossStage;
pub use collision::{Rect, collides, intersects};
pub use director::{Director, DirectorPhase, GameEvent, Outcome, RunStatus};
pub use entity::{AmmoDisplay, Asteroid, Boss, Bullet, Entity, Explosion, FireBall, Ship};
pub use stage::{Stage, StageConfig, StageKind, StageSnapshot, StageStatus, TickInput};
pub use timer::Countdown;
pub use visual::{Scene, VisualHandle, VisualKind, VisualRecord, VisualRegistry, Visuals};
