//! Stage contract and helpers shared by both levels
//!
//! A stage owns every entity on screen for one level. The director hands it
//! input and elapsed time, then asks for the end condition. Within a tick the
//! order is always: input, motion, pruning, collisions; end-condition
//! evaluation follows as a separate call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{AmmoDisplay, Bullet, Entity, Ship};
use super::visual::{Scene, VisualHandle, VisualKind, Visuals};
use crate::consts::*;

/// Result of an end-condition check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageStatus {
    InProgress,
    Win,
    Lose,
}

/// Which level a stage implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    Asteroids,
    Boss,
}

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move left (held)
    pub move_left: bool,
    /// Move right (held)
    pub move_right: bool,
    /// Fire (pressed this tick, edge-triggered)
    pub fire: bool,
}

/// Parameters a stage is built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Seed for every random decision the stage makes
    pub seed: u64,
    pub asteroid_count: usize,
    pub starting_ammo: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            asteroid_count: ASTEROID_COUNT,
            starting_ammo: STARTING_AMMO,
        }
    }
}

/// Read-only view of a stage for HUDs and autopilots
#[derive(Debug, Clone, PartialEq)]
pub struct StageSnapshot {
    pub kind: StageKind,
    pub ship: Vec2,
    pub ship_destroyed: bool,
    pub ammo: u32,
    pub bullets: usize,
    /// Asteroid centers, or the boss position while it lives
    pub targets: Vec<Vec2>,
    pub boss_hit_points: Option<usize>,
    pub fireball: Option<Vec2>,
    pub explosions: usize,
}

/// Capability set every level implements
pub trait Stage {
    fn kind(&self) -> StageKind;

    /// Run one tick: input, motion, pruning, collisions
    fn update(&mut self, dt: f32, input: &TickInput, scene: &mut Scene<'_>);

    fn evaluate_end_condition(&self) -> StageStatus;

    /// The time budget ran out; the next end-condition check reports Lose
    fn expire(&mut self);

    /// Release every owned visual and empty all collections
    fn reset_entities(&mut self, visuals: &mut dyn Visuals);

    /// Tear down and rebuild the initial spawn configuration
    fn restart(&mut self, scene: &mut Scene<'_>);

    fn snapshot(&self) -> StageSnapshot;
}

/// Full-screen background owned by a stage
#[derive(Debug, Clone)]
pub(crate) struct Backdrop {
    handle: Option<VisualHandle>,
}

impl Backdrop {
    pub(crate) fn new(kind: VisualKind, scene: &mut Scene<'_>) -> Self {
        let handle = scene.spawn_visual(kind, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0));
        Self {
            handle: Some(handle),
        }
    }

    pub(crate) fn release(&mut self, visuals: &mut dyn Visuals) {
        if let Some(handle) = self.handle.take() {
            visuals.remove_visual(handle);
        }
    }
}

/// Apply movement and fire intents to the ship.
///
/// Holding both directions cancels out. A refused shot leaves everything untouched.
pub(crate) fn apply_ship_input(
    ship: &mut Ship,
    ammo_display: &mut AmmoDisplay,
    bullets: &mut Vec<Bullet>,
    input: &TickInput,
    dt: f32,
    scene: &mut Scene<'_>,
) {
    if input.move_left {
        ship.move_by(-SHIP_SPEED * dt, scene.visuals);
    }
    if input.move_right {
        ship.move_by(SHIP_SPEED * dt, scene.visuals);
    }
    if input.fire {
        if let Some(bullet) = ship.fire(scene) {
            bullets.push(bullet);
            ammo_display.refresh(ship.ammo(), scene.visuals);
        }
    }
}

/// Update every live entity and rebuild the collection without the destroyed ones
pub(crate) fn advance_and_prune<E: Entity>(items: &mut Vec<E>, dt: f32, scene: &mut Scene<'_>) {
    let previous = std::mem::take(items);
    *items = previous
        .into_iter()
        .filter(|item| !item.is_destroyed())
        .filter_map(|mut item| {
            item.update(dt, scene);
            (!item.is_destroyed()).then_some(item)
        })
        .collect();
}

/// Release and drop every entity in the collection
pub(crate) fn release_all<E: Entity>(items: &mut Vec<E>, visuals: &mut dyn Visuals) {
    for mut item in items.drain(..) {
        item.release(visuals);
    }
}

/// Ship can no longer hurt anything: magazine empty and nothing in flight
pub(crate) fn out_of_offense(ship: &Ship, bullets: &[Bullet]) -> bool {
    ship.ammo() == 0 && bullets.is_empty()
}
