//! # CNCSim
//!
//! A headless 3-axis CNC machine simulator core.
//!
//! ## Architecture
//!
//! CNCSim is organized as a workspace with multiple crates:
//!
//! 1. **cncsim-core** - Machine state, pose, TRACEPOSE records, events, errors
//! 2. **cncsim-kinematics** - Forward kinematics (`T_mcs_from_tcp`)
//! 3. **cncsim-controller** - Machine controller and simulation playback
//! 4. **cncsim-settings** - JSON/TOML configuration
//! 5. **cncsim** - Logging setup, the playback driver and the binary

pub mod driver;

pub use cncsim_controller::{
    interval_for_speed, GcodeProgram, MachineController, Playback, PlaybackState, Step,
};
pub use cncsim_core::{
    default_axes, log_tracepose, AxisConfig, AxisType, Error, EventCategory, EventDispatcher,
    GlMatrixTarget, KinematicConfig, MachineState, Material, Pose, PoseError, Result,
    SimulationError, SimulationEvent, SubscriptionId, ToolParameters, ToolType, TracePose,
    ValidationError, WorkpieceParameters, ZeroPoint,
};
pub use cncsim_kinematics::{forward_kinematics, translation, KinematicModel, ThreeAxisVmc};
pub use cncsim_settings::{Config, MachineSettings, SettingsError, SimulationSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Cargo profile the binary was built with
pub const BUILD_PROFILE: &str = env!("BUILD_PROFILE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output in the requested format
/// - RUST_LOG environment variable support (INFO by default)
/// - Target, thread and line number annotations
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_line_number(true)
                    .pretty(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stdout)
                    .with_target(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init()?,
    }

    Ok(())
}
