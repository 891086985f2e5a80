//! Error handling for CNCSim
//!
//! Provides error types for every layer of the simulator core:
//! - Pose errors (malformed homogeneous input)
//! - Validation errors (axis, tool and workpiece parameters)
//! - Simulation errors (program loading and playback)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Pose error type
///
/// Raised when a point handed to a [`crate::Pose`] is not a homogeneous
/// 4-vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PoseError {
    /// Input vector has the wrong number of components
    #[error("Invalid input: expected a {expected}-element homogeneous vector, got {actual} elements")]
    InvalidInput {
        /// Number of components required.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },
}

/// Validation error type
///
/// Represents rejected user input for axes, tools and the workpiece.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Axis limits are inverted or empty
    #[error("Minimum value must be less than maximum ({axis}: {minimum} >= {maximum}).")]
    AxisLimits {
        /// The axis name.
        axis: String,
        /// The configured minimum.
        minimum: f64,
        /// The configured maximum.
        maximum: f64,
    },

    /// Axis is not part of the configuration
    #[error("Unknown axis: {axis}")]
    UnknownAxis {
        /// The axis name.
        axis: String,
    },

    /// Axis exists but is switched off
    #[error("Axis {axis} is not active")]
    AxisInactive {
        /// The axis name.
        axis: String,
    },

    /// Requested axis position lies outside the axis limits
    #[error("Position {value} out of range for axis {axis} ({minimum}..{maximum})")]
    PositionOutOfRange {
        /// The axis name.
        axis: String,
        /// The requested position.
        value: f64,
        /// The axis minimum.
        minimum: f64,
        /// The axis maximum.
        maximum: f64,
    },

    /// Tool diameter is zero or negative
    #[error("Tool diameter must be positive (got {diameter}).")]
    ToolDiameter {
        /// The rejected diameter in millimeters.
        diameter: f64,
    },

    /// Tool is shorter than its cutting length
    #[error("Tool length must exceed cutting length ({length} < {cutting_length}).")]
    ToolLength {
        /// Overall tool length in millimeters.
        length: f64,
        /// Cutting length in millimeters.
        cutting_length: f64,
    },

    /// Workpiece dimension is zero or negative
    #[error("Workpiece {dimension} must be positive (got {value}).")]
    WorkpieceDimension {
        /// The dimension name.
        dimension: String,
        /// The rejected value in millimeters.
        value: f64,
    },
}

/// Simulation error type
///
/// Represents failures while loading programs or controlling playback.
#[derive(Error, Debug, Clone)]
pub enum SimulationError {
    /// Playback requested with no program loaded
    #[error("Load G-code before starting.")]
    NoProgram,

    /// Program file could not be read
    #[error("Failed to read {}: {reason}", path.display())]
    File {
        /// The program path.
        path: PathBuf,
        /// The reason the read failed.
        reason: String,
    },
}

/// Main error type for CNCSim
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Pose error
    #[error(transparent)]
    Pose(#[from] PoseError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Simulation error
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl Error {
    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a simulation error
    pub fn is_simulation_error(&self) -> bool {
        matches!(self, Error::Simulation(_))
    }

    /// Short title used when reporting the error to an observer
    pub fn title(&self) -> &'static str {
        match self {
            Error::Pose(_) => "Pose",
            Error::Validation(_) => "Validation",
            Error::Simulation(SimulationError::File { .. }) => "File error",
            Error::Simulation(_) => "Simulation",
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_error_display() {
        let err = PoseError::InvalidInput {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: expected a 4-element homogeneous vector, got 3 elements"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::ToolDiameter { diameter: 0.0 };
        assert_eq!(err.to_string(), "Tool diameter must be positive (got 0).");

        let err = ValidationError::UnknownAxis {
            axis: "B".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown axis: B");
    }

    #[test]
    fn test_no_program_message() {
        assert_eq!(
            SimulationError::NoProgram.to_string(),
            "Load G-code before starting."
        );
    }

    #[test]
    fn test_error_conversion_and_title() {
        let err: Error = ValidationError::AxisLimits {
            axis: "X".to_string(),
            minimum: 10.0,
            maximum: 5.0,
        }
        .into();
        assert!(err.is_validation_error());
        assert_eq!(err.title(), "Validation");

        let err: Error = SimulationError::File {
            path: PathBuf::from("missing.nc"),
            reason: "not found".to_string(),
        }
        .into();
        assert!(err.is_simulation_error());
        assert_eq!(err.title(), "File error");
        assert_eq!(err.to_string(), "Failed to read missing.nc: not found");

        let err: Error = SimulationError::NoProgram.into();
        assert_eq!(err.title(), "Simulation");
    }
}
