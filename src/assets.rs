//! Asset resolution
//!
//! The renderer loads textures; the simulation only needs to know that every
//! visual kind has a resolved asset and how big it is drawn. Resolution runs
//! once at startup and a missing file aborts before any stage is built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};
use crate::error::{Error, Result};
use crate::sim::VisualKind;

/// One manifest line: where the texture lives and its drawn size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Texture file relative to the asset root; `None` for drawn shapes
    pub path: Option<PathBuf>,
    pub width: f32,
    pub height: f32,
}

impl AssetEntry {
    fn texture(path: &str, width: f32, height: f32) -> Self {
        Self {
            path: Some(PathBuf::from(path)),
            width,
            height,
        }
    }

    fn shape(width: f32, height: f32) -> Self {
        Self {
            path: None,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Visual kind → asset entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub entries: BTreeMap<VisualKind, AssetEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (
                VisualKind::AsteroidBackground,
                AssetEntry::texture("images/2.jpeg", WIDTH, HEIGHT),
            ),
            (
                VisualKind::BossBackground,
                AssetEntry::texture("images/background2.png", WIDTH, HEIGHT),
            ),
            (
                VisualKind::Ship,
                AssetEntry::texture("images/clipart399672.png", 170.0, 170.0),
            ),
            (
                VisualKind::Asteroid,
                AssetEntry::texture("images/asteroid.png", 100.0, 100.0),
            ),
            (VisualKind::Bullet, AssetEntry::shape(30.0, 30.0)),
            (
                VisualKind::Explosion,
                AssetEntry::texture("images/explosion.png", 120.0, 120.0),
            ),
            (
                VisualKind::Boss,
                AssetEntry::texture("images/boss.png", 200.0, 200.0),
            ),
            (
                VisualKind::HitPoint,
                AssetEntry::texture("images/hp.png", 30.0, 30.0),
            ),
            (
                VisualKind::FireBall,
                AssetEntry::texture("images/fireBall.png", 70.0, 50.0),
            ),
            (VisualKind::AmmoIcon, AssetEntry::shape(30.0, 30.0)),
        ]);
        Self { entries }
    }
}

/// Resolved asset table handed to stages and entities
#[derive(Debug, Clone)]
pub struct Assets {
    sizes: BTreeMap<VisualKind, Vec2>,
}

impl Assets {
    /// Check every kind against the manifest and the files under `root`
    pub fn resolve(manifest: &AssetManifest, root: &Path) -> Result<Self> {
        let mut sizes = BTreeMap::new();
        for kind in VisualKind::ALL {
            let entry = manifest
                .entries
                .get(&kind)
                .ok_or(Error::UnlistedAsset(kind))?;
            if let Some(rel) = &entry.path {
                let path = root.join(rel);
                if !path.is_file() {
                    return Err(Error::MissingAsset { kind, path });
                }
            }
            sizes.insert(kind, entry.size());
        }
        log::info!("Resolved {} assets from {}", sizes.len(), root.display());
        Ok(Self { sizes })
    }

    /// Default sizes without touching the filesystem
    pub fn builtin() -> Self {
        let sizes = AssetManifest::default()
            .entries
            .into_iter()
            .map(|(kind, entry)| (kind, entry.size()))
            .collect();
        Self { sizes }
    }

    /// Drawn size of a visual kind
    pub fn size_of(&self, kind: VisualKind) -> Vec2 {
        // Both constructors insert every kind.
        self.sizes.get(&kind).copied().unwrap_or(Vec2::ZERO)
    }
}
