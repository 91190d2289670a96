//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skyturn_sky::{ActiveProperties, PaletteTable};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Starfield appearance and motion.
    pub sky: SkyConfig,
    /// Viewport and camera settings.
    pub view: ViewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Starfield configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkyConfig {
    /// Apparent sky rotation in degrees per second.
    pub rotation_rate_deg_per_s: f64,
    /// Name of the active color scheme.
    pub color_scheme: String,
    /// RON star catalog. When unset, a catalog is generated from `seed`.
    pub catalog_path: Option<PathBuf>,
    /// Number of stars to generate when no catalog file is given.
    pub generated_star_count: u32,
    /// Seed for the generated catalog.
    pub seed: u64,
}

/// Viewport and camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Base field of view in degrees, scaled by aspect ratio.
    pub horizontal_fov_deg: f32,
    /// Initial camera roll in degrees (Earth's axial tilt).
    pub tilt_deg: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Star point size in pixels.
    pub point_size: f32,
    /// Target frame rate (0 = unpaced).
    pub target_fps: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Seconds between checks of `config.ron` for changes (0 = never).
    pub config_poll_seconds: f64,
}

// --- Default implementations ---

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            rotation_rate_deg_per_s: 0.5,
            color_scheme: PaletteTable::CATPPUCCIN_MOCHA.to_string(),
            catalog_path: None,
            generated_star_count: 5000,
            seed: 42,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            horizontal_fov_deg: 56.0,
            tilt_deg: 23.5,
            near: 0.01,
            far: 1000.0,
            point_size: 3.0,
            target_fps: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            config_poll_seconds: 2.0,
        }
    }
}

impl Config {
    /// The starfield properties this config selects, with the rate in radians.
    pub fn active_properties(&self) -> ActiveProperties {
        ActiveProperties {
            rotation_rate: self.sky.rotation_rate_deg_per_s.to_radians(),
            color_scheme: self.sky.color_scheme.clone(),
        }
    }
}

// --- Load / Save / Reload ---

/// File name of the config inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

impl Config {
    /// Path of the config file inside `config_dir`.
    pub fn path_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    fn read_file(config_path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.to_path_buf(),
                source,
            })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::path_in(config_dir);

        if config_path.exists() {
            let config = Self::read_file(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = Self::path_in(config_dir);
        let write_error = |source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(write_error)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read_file(&Self::path_in(config_dir))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
