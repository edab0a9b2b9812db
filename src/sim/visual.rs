//! Visual ownership seam between the simulation and whatever draws it
//!
//! The simulation never looks at pixels. Entities ask a [`Visuals`]
//! implementation to create, move, rotate and remove opaque handles; the host
//! maps those onto sprites. [`VisualRegistry`] is the in-memory implementation
//! used by the headless runner and by tests.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Assets;

/// What a visual depicts (one texture or drawn shape per kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    AsteroidBackground,
    BossBackground,
    Ship,
    Asteroid,
    Bullet,
    Explosion,
    Boss,
    HitPoint,
    FireBall,
    AmmoIcon,
}

impl VisualKind {
    pub const ALL: [VisualKind; 10] = [
        VisualKind::AsteroidBackground,
        VisualKind::BossBackground,
        VisualKind::Ship,
        VisualKind::Asteroid,
        VisualKind::Bullet,
        VisualKind::Explosion,
        VisualKind::Boss,
        VisualKind::HitPoint,
        VisualKind::FireBall,
        VisualKind::AmmoIcon,
    ];
}

/// Opaque handle to a visual owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// Commands the simulation issues to the renderer
pub trait Visuals {
    fn create_visual(&mut self, kind: VisualKind, position: Vec2, size: Vec2) -> VisualHandle;
    fn remove_visual(&mut self, handle: VisualHandle);
    fn set_visual_position(&mut self, handle: VisualHandle, x: f32, y: f32);
    fn set_visual_rotation(&mut self, handle: VisualHandle, radians: f32);
    /// Label text for HUD visuals; hosts without text rendering can ignore it
    fn set_visual_text(&mut self, _handle: VisualHandle, _text: &str) {}
}

/// Everything an entity needs from the outside world during a tick
pub struct Scene<'a> {
    pub visuals: &'a mut dyn Visuals,
    pub assets: &'a Assets,
}

impl<'a> Scene<'a> {
    pub fn new(visuals: &'a mut dyn Visuals, assets: &'a Assets) -> Self {
        Self { visuals, assets }
    }

    /// Create a visual sized from the asset table
    pub fn spawn_visual(&mut self, kind: VisualKind, position: Vec2) -> VisualHandle {
        let size = self.assets.size_of(kind);
        self.visuals.create_visual(kind, position, size)
    }
}

/// State of one live visual as last commanded
#[derive(Debug, Clone, PartialEq)]
pub struct VisualRecord {
    pub kind: VisualKind,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub text: Option<String>,
}

/// Recording visual owner (headless host, tests)
#[derive(Debug, Default)]
pub struct VisualRegistry {
    next_id: u64,
    live: BTreeMap<VisualHandle, VisualRecord>,
    created: u64,
    removed: u64,
    /// Removals or updates addressed to handles that are not live
    stale_commands: u64,
}

impl VisualRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn count_of(&self, kind: VisualKind) -> usize {
        self.live.values().filter(|v| v.kind == kind).count()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&VisualRecord> {
        self.live.get(&handle)
    }

    pub fn is_live(&self, handle: VisualHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn created_count(&self) -> u64 {
        self.created
    }

    pub fn removed_count(&self) -> u64 {
        self.removed
    }

    pub fn stale_commands(&self) -> u64 {
        self.stale_commands
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VisualHandle, &VisualRecord)> {
        self.live.iter()
    }

    fn record_mut(&mut self, handle: VisualHandle) -> Option<&mut VisualRecord> {
        let record = self.live.get_mut(&handle);
        if record.is_none() {
            log::warn!("Command for unknown visual {:?}", handle);
            self.stale_commands += 1;
        }
        record
    }
}

impl Visuals for VisualRegistry {
    fn create_visual(&mut self, kind: VisualKind, position: Vec2, size: Vec2) -> VisualHandle {
        self.next_id += 1;
        self.created += 1;
        let handle = VisualHandle(self.next_id);
        self.live.insert(
            handle,
            VisualRecord {
                kind,
                position,
                size,
                rotation: 0.0,
                text: None,
            },
        );
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.removed += 1;
        } else {
            log::warn!("Visual {:?} released twice", handle);
            self.stale_commands += 1;
        }
    }

    fn set_visual_position(&mut self, handle: VisualHandle, x: f32, y: f32) {
        if let Some(record) = self.record_mut(handle) {
            record.position = Vec2::new(x, y);
        }
    }

    fn set_visual_rotation(&mut self, handle: VisualHandle, radians: f32) {
        if let Some(record) = self.record_mut(handle) {
            record.rotation = radians;
        }
    }

    fn set_visual_text(&mut self, handle: VisualHandle, text: &str) {
        if let Some(record) = self.record_mut(handle) {
            record.text = Some(text.to_string());
        }
    }
}
