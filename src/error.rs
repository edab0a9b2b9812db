//! Error types for startup-time failures
//!
//! Nothing in the per-tick simulation returns an error. Only asset resolution
//! and settings loading can fail, and both happen before any stage exists.

use std::path::PathBuf;

use thiserror::Error;

use crate::sim::VisualKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing asset for {kind:?}: {path}")]
    MissingAsset { kind: VisualKind, path: PathBuf },

    #[error("Asset manifest has no entry for {0:?}")]
    UnlistedAsset(VisualKind),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

/// Result type alias for startup operations
pub type Result<T> = std::result::Result<T, Error>;
