//! Run settings
//!
//! Loaded from a JSON file; every field falls back to the fixed game's value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{ASTEROID_COUNT, STARTING_AMMO, TIME_LIMIT_MS};
use crate::error::{Error, Result};
use crate::sim::{StageConfig, StageKind};

/// Offset between the stage-one seed and the stage-two stream
const BOSS_STAGE_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; random when absent
    pub seed: Option<u64>,
    /// Countdown per stage
    pub time_limit_ms: u64,
    /// Asteroids spawned in stage one
    pub asteroid_count: usize,
    /// Magazine size at the start of each stage
    pub starting_ammo: u32,
    /// Upper bound on ticks for headless runs
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            time_limit_ms: TIME_LIMIT_MS,
            asteroid_count: ASTEROID_COUNT,
            starting_ammo: STARTING_AMMO,
            max_ticks: 2 * 60 * 60,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Like [`Settings::load`], but a missing file means defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_limit_ms == 0 {
            return Err(Error::InvalidSetting {
                field: "time_limit_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.asteroid_count == 0 {
            return Err(Error::InvalidSetting {
                field: "asteroid_count",
                reason: "stage one needs at least one asteroid".to_string(),
            });
        }
        Ok(())
    }

    /// Fixed seed if configured, otherwise a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Build the parameters for one stage of a run seeded with `run_seed`
    pub fn stage_config(&self, kind: StageKind, run_seed: u64) -> StageConfig {
        let seed = match kind {
            StageKind::Asteroids => run_seed,
            StageKind::Boss => run_seed.wrapping_add(BOSS_STAGE_STREAM),
        };
        StageConfig {
            seed,
            asteroid_count: self.asteroid_count,
            starting_ammo: self.starting_ammo,
        }
    }
}
