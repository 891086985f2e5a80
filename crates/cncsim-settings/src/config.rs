//! Configuration and settings management for CNCSim
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into sections:
//! - Machine settings (envelope, axis table)
//! - Tool parameters (mounted tool)
//! - Workpiece parameters (stock)
//! - Simulation preferences (playback speed, TRACEPOSE logging)

use crate::error::{ConfigError, SettingsResult};
use cncsim_core::{default_axes, AxisConfig, ToolParameters, WorkpieceParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
const APP_DIR: &str = "cncsim";

/// Default config file name
const CONFIG_FILE: &str = "config.toml";

/// Highest accepted playback speed in percent
pub const MAX_SPEED: u32 = 200;

/// Machine preference settings
///
/// Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Machine envelope along X (mm)
    pub envelope_x: f64,
    /// Machine envelope along Y (mm)
    pub envelope_y: f64,
    /// Machine envelope along Z (mm)
    pub envelope_z: f64,
    /// Axis table
    pub axes: Vec<AxisConfig>,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            envelope_x: 500.0,
            envelope_y: 400.0,
            envelope_z: 300.0,
            axes: default_axes(),
        }
    }
}

/// Playback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Playback speed in percent (1..=200)
    pub speed: u32,
    /// Log a TRACEPOSE record on every machine state change
    pub tracepose: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            speed: 100,
            tracepose: false,
        }
    }
}

/// Complete simulator configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub machine: MachineSettings,
    #[serde(default)]
    pub tool: ToolParameters,
    #[serde(default)]
    pub workpiece: WorkpieceParameters,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/cncsim/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [
            ("machine.envelope_x", self.machine.envelope_x),
            ("machine.envelope_y", self.machine.envelope_y),
            ("machine.envelope_z", self.machine.envelope_z),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        for axis in &self.machine.axes {
            axis.validate()?;
        }
        self.tool.validate()?;
        self.workpiece.validate()?;

        if !(1..=MAX_SPEED).contains(&self.simulation.speed) {
            return Err(ConfigError::ValueOutOfRange {
                key: "simulation.speed".to_string(),
                value: self.simulation.speed.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
