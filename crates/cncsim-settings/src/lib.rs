//! CNCSim Settings Crate
//!
//! Handles simulator configuration: machine envelope and axes, the mounted
//! tool, the workpiece and playback preferences, stored as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, MachineSettings, SimulationSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
