use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Per-user directories for the config and log files.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "birdman", "Birdman")
}

/// Tunable constants. Units are canvas pixels, pixels per tick and milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub ground_height: f64,
    pub gravity: f64,
    pub scroll_speed: f64,
    /// Ticks between obstacle spawns.
    pub obstacle_frequency: u64,
    pub jump_force: f64,
    pub bird_speed: f64,
    pub gesture_window_ms: u64,
    pub bird_duration_ms: u64,
    pub splat_duration_ms: u64,
    pub splat_text_ms: u64,
    pub grace_period_ms: u64,
    pub tick_rate_ms: u64,
    /// Terminals without key-release reporting get a synthetic release after this long.
    pub synthetic_release_ms: u64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 400.0,
            ground_height: 50.0,
            gravity: 0.5,
            scroll_speed: 2.0,
            obstacle_frequency: 150,
            jump_force: -10.0,
            bird_speed: 4.0,
            gesture_window_ms: 300,
            bird_duration_ms: 3000,
            splat_duration_ms: 1000,
            splat_text_ms: 2000,
            grace_period_ms: 5000,
            tick_rate_ms: 16,
            synthetic_release_ms: 600,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from `path` if given, else from the per-user config file if it
    /// exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };
        let config = Self::from_file(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|p| p.config_dir().join("config.json"))
    }

    pub fn ground_line(&self) -> f64 {
        self.canvas_height - self.ground_height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if !(self.canvas_width > crate::game::PLAYER_WIDTH) {
            return invalid("canvas_width must be larger than the player");
        }
        if !(self.canvas_height > crate::game::PLAYER_HEIGHT) {
            return invalid("canvas_height must be larger than the player");
        }
        if !(self.ground_height >= 0.0) || self.ground_line() < crate::game::PLAYER_HEIGHT {
            return invalid("ground_height must leave room for the player");
        }
        if self.obstacle_frequency == 0 {
            return invalid("obstacle_frequency must be positive");
        }
        if self.gesture_window_ms == 0
            || self.bird_duration_ms == 0
            || self.splat_duration_ms == 0
            || self.tick_rate_ms == 0
        {
            return invalid("durations must be positive");
        }
        if !(self.gravity > 0.0) || !(self.scroll_speed >= 0.0) || !(self.bird_speed >= 0.0) {
            return invalid("gravity must be positive and speeds non-negative");
        }
        Ok(())
    }
}
