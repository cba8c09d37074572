//! Engine configuration.
//!
//! Provides where progress is saved, how logging is set up, and the tuning
//! of the river game. Configuration can be loaded from and saved to a file.

use nile_gameplay::{SailConfig, MIN_SPAWN_INTERVAL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "nile-quest.toml";

/// Directory name under the platform config directory.
const APP_DIR: &str = "nile-quest";

/// Where snapshots are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Nothing survives the session.
    Memory,
    /// One JSON file per key in [`EngineConfig::save_dir`].
    #[default]
    File,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Storage ===
    /// Snapshot backend
    pub storage: StorageKind,
    /// Directory for file snapshots (None = platform default)
    pub save_dir: Option<PathBuf>,

    // === Logging ===
    /// Filter directives used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Log line format
    pub log_format: LogFormat,

    // === Gameplay ===
    /// Seed for card shuffles and river spawns (None = random)
    pub rng_seed: Option<u64>,
    /// Capacity of the event bus
    pub event_capacity: usize,
    /// Sail the Nile tuning
    pub sail: SailConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::File,
            save_dir: None,

            log_filter: "nile=info".to_string(),
            log_format: LogFormat::Pretty,

            rng_seed: None,
            event_capacity: 256,
            sail: SailConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        let mut contents = String::new();
        if let Err(e) = fs::File::open(path).and_then(|mut file| file.read_to_string(&mut contents)) {
            warn!("Failed to read config file: {e}");
            return Self::default();
        }

        match toml::from_str::<Self>(&contents) {
            Ok(mut config) => {
                config.validate();
                info!("Loaded config from {}", path.display());
                config
            },
            Err(e) => {
                warn!("Failed to parse config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to the default file location.
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Self::config_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Directory holding file snapshots.
    #[must_use]
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            dirs_config_path().map_or_else(|| PathBuf::from("saves"), |dir| dir.join(APP_DIR).join("saves"))
        })
    }

    /// Get the default configuration file path.
    fn config_path() -> PathBuf {
        if let Some(config_dir) = dirs_config_path() {
            config_dir.join(APP_DIR).join(CONFIG_FILE)
        } else {
            PathBuf::from(CONFIG_FILE)
        }
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        if self.log_filter.trim().is_empty() {
            self.log_filter = Self::default().log_filter;
        }
        self.event_capacity = self.event_capacity.clamp(16, 4096);

        // River game
        let sail = &mut self.sail;
        sail.area_width = sail.area_width.clamp(100.0, 2000.0);
        sail.area_height = sail.area_height.clamp(100.0, 2000.0);
        sail.boat_size = sail.boat_size.clamp(10.0, sail.area_width);
        sail.object_size = sail.object_size.clamp(5.0, sail.area_width);
        sail.duration = sail.duration.clamp(5.0, 300.0);
        sail.spawn_interval = sail.spawn_interval.clamp(MIN_SPAWN_INTERVAL, 10.0);
        sail.lotus_chance = sail.lotus_chance.clamp(0.0, 1.0);
        sail.fall_speed = sail.fall_speed.clamp(10.0, 1000.0);
        sail.nudge_step = sail.nudge_step.clamp(1.0, 200.0);
    }
}

/// Get platform-specific config directory.
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA").ok().map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var("HOME")
                    .ok()
                    .map(|h| PathBuf::from(h).join(".config"))
            })
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        None
    }
}
