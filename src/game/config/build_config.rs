//! Build Configuration
//!
//! Tunables for snapping, interaction and world queries. `Default` carries the
//! values the build mode ships with; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Hard upper bound on the candidate list length.
pub const MAX_SNAP_CANDIDATES: usize = 4;

/// Errors raised while loading or validating a [`BuildConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Connector snapping parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Connectors farther than this from the hit point are ignored (meters)
    pub radius: f32,
    /// Maximum number of candidates kept per query (at most 4)
    pub max_candidates: usize,
    /// Hit-point motion below this keeps the previous candidates (meters)
    pub stability_threshold: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            max_candidates: MAX_SNAP_CANDIDATES,
            stability_threshold: 0.3,
        }
    }
}

/// Discrete interaction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Yaw change per rotate action (degrees)
    pub rotation_step_degrees: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            rotation_step_degrees: 45.0,
        }
    }
}

/// World query parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Placement and removal rays stop after this distance (meters)
    pub max_ray_distance: f32,
    /// Faces of colliders are pulled in by this much before overlap tests,
    /// so pieces that merely touch are not reported as overlapping
    pub overlap_tolerance: f32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            max_ray_distance: 64.0,
            overlap_tolerance: 0.05,
        }
    }
}

/// Complete build-mode configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub snap: SnapConfig,
    pub interaction: InteractionConfig,
    pub query: QueryConfig,
}

impl BuildConfig {
    /// Parse and validate a config from JSON text. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: BuildConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("[Config] Loaded build config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("[Config] {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
            }
        }

        positive("snap.radius", self.snap.radius)?;
        positive("snap.stability_threshold", self.snap.stability_threshold)?;
        positive("interaction.rotation_step_degrees", self.interaction.rotation_step_degrees)?;
        positive("query.max_ray_distance", self.query.max_ray_distance)?;

        if !(1..=MAX_SNAP_CANDIDATES).contains(&self.snap.max_candidates) {
            return Err(ConfigError::Invalid(format!(
                "snap.max_candidates must be within 1..={MAX_SNAP_CANDIDATES}, got {}",
                self.snap.max_candidates
            )));
        }
        if !self.query.overlap_tolerance.is_finite() || self.query.overlap_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "query.overlap_tolerance must be >= 0, got {}",
                self.query.overlap_tolerance
            )));
        }
        Ok(())
    }
}
