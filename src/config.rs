use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "SPACE_CLEANUP_CONFIG";
pub const LOG_ENV_VAR: &str = "SPACE_CLEANUP_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the game and the terminal loop. Every field has a default,
/// so a config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub player_size: f32,
    pub debris_size: f32,
    pub resource_diameter: f32,
    pub player_speed: f32,
    /// Debris moves at this plus the current level, per frame.
    pub debris_base_speed: f32,
    pub resource_speed: f32,
    pub debris_interval_ms: u64,
    pub resource_interval_ms: u64,
    pub max_misses: u8,
    pub progress_per_resource: u8,
    pub score_per_resource: u32,
    /// Upper bound on live entities per collection; extra spawns are dropped.
    pub max_live_entities: usize,
    pub tick_rate_ms: u64,
    /// How long a key press holds a direction when the terminal does not
    /// report key releases.
    pub key_hold_ms: u64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 400.0,
            player_size: 40.0,
            debris_size: 30.0,
            resource_diameter: 20.0,
            player_speed: 5.0,
            debris_base_speed: 5.0,
            resource_speed: 5.0,
            debris_interval_ms: 1500,
            resource_interval_ms: 2000,
            max_misses: 3,
            progress_per_resource: 10,
            score_per_resource: 10,
            max_live_entities: 256,
            tick_rate_ms: 16,
            key_hold_ms: 150,
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Loads the file named by `SPACE_CLEANUP_CONFIG`, or the defaults when
    /// the variable is unset. `SPACE_CLEANUP_LOG` overrides `log_file`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(log) = std::env::var_os(LOG_ENV_VAR).filter(|v| !v.is_empty()) {
            config.log_file = Some(PathBuf::from(log));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_size", self.player_size),
            ("debris_size", self.debris_size),
            ("resource_diameter", self.resource_diameter),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        let largest = self
            .player_size
            .max(self.debris_size)
            .max(self.resource_diameter);
        if largest > self.field_width || largest > self.field_height {
            return Err(ConfigError::Invalid(format!(
                "entities up to {largest}px do not fit a {}x{} field",
                self.field_width, self.field_height
            )));
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("debris_base_speed", self.debris_base_speed),
            ("resource_speed", self.resource_speed),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be non-negative, got {value}")));
            }
        }
        if self.debris_interval_ms == 0 || self.resource_interval_ms == 0 {
            return Err(ConfigError::Invalid("spawn intervals must be non-zero".into()));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be non-zero".into()));
        }
        if self.max_misses == 0 {
            return Err(ConfigError::Invalid("max_misses must be at least 1".into()));
        }
        if self.progress_per_resource == 0 || self.progress_per_resource > 100 {
            return Err(ConfigError::Invalid(format!(
                "progress_per_resource must be in 1..=100, got {}",
                self.progress_per_resource
            )));
        }
        Ok(())
    }

    pub fn debris_interval(&self) -> Duration {
        Duration::from_millis(self.debris_interval_ms)
    }

    pub fn resource_interval(&self) -> Duration {
        Duration::from_millis(self.resource_interval_ms)
    }

    pub fn key_hold(&self) -> Duration {
        Duration::from_millis(self.key_hold_ms)
    }
}
