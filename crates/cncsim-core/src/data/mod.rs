//! Data models for the machine, tool and workpiece
//!
//! This module provides:
//! - Axis configuration (linear and rotary axes with travel limits)
//! - Tool parameters with validation
//! - Workpiece stock definition

pub mod tools;
pub mod workpiece;

pub use tools::{ToolParameters, ToolType};
pub use workpiece::{Material, WorkpieceParameters, ZeroPoint};

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    /// Linear axis, limits in millimeters
    Linear,
    /// Rotary axis, limits in degrees
    Rotary,
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Rotary => write!(f, "Rotary"),
        }
    }
}

/// A single configured machine axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Axis letter (X, Y, Z, A, ...)
    pub name: String,
    /// Linear or rotary
    pub axis_type: AxisType,
    /// Lower travel limit
    pub minimum: f64,
    /// Upper travel limit
    pub maximum: f64,
    /// Whether the axis takes part in motion
    pub active: bool,
}

impl AxisConfig {
    /// Create an active axis
    pub fn new(name: impl Into<String>, axis_type: AxisType, minimum: f64, maximum: f64) -> Self {
        Self {
            name: name.into(),
            axis_type,
            minimum,
            maximum,
            active: true,
        }
    }

    /// Same axis with the active flag set to `active`
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check that the minimum lies strictly below the maximum
    pub fn validate(&self) -> Result<(), ValidationError> {
        // NaN limits fail this comparison and are rejected too
        if self.minimum < self.maximum {
            Ok(())
        } else {
            Err(ValidationError::AxisLimits {
                axis: self.name.clone(),
                minimum: self.minimum,
                maximum: self.maximum,
            })
        }
    }

    /// Whether `value` lies within the travel limits (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.minimum && value <= self.maximum
    }

    /// Check that `value` is a reachable position on this axis
    pub fn check_position(&self, value: f64) -> Result<(), ValidationError> {
        if !self.active {
            return Err(ValidationError::AxisInactive {
                axis: self.name.clone(),
            });
        }
        if !self.contains(value) {
            return Err(ValidationError::PositionOutOfRange {
                axis: self.name.clone(),
                value,
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        Ok(())
    }
}

/// Stock axis table of a 3-axis vertical machining center.
///
/// X, Y and Z are active linear axes. A rotary A axis is present but
/// switched off.
pub fn default_axes() -> Vec<AxisConfig> {
    vec![
        AxisConfig::new("X", AxisType::Linear, -250.0, 250.0),
        AxisConfig::new("Y", AxisType::Linear, -200.0, 200.0),
        AxisConfig::new("Z", AxisType::Linear, 0.0, 300.0),
        AxisConfig::new("A", AxisType::Rotary, -180.0, 180.0).with_active(false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_axes() {
        let axes = default_axes();
        let names: Vec<&str> = axes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y", "Z", "A"]);
        assert!(axes.iter().all(|a| a.validate().is_ok()));
        assert!(!axes[3].active);
        assert_eq!(axes[3].axis_type, AxisType::Rotary);
    }

    #[test]
    fn test_validate_rejects_inverted_limits() {
        let axis = AxisConfig::new("X", AxisType::Linear, 10.0, 10.0);
        assert_eq!(
            axis.validate(),
            Err(ValidationError::AxisLimits {
                axis: "X".to_string(),
                minimum: 10.0,
                maximum: 10.0
            })
        );
        assert!(AxisConfig::new("X", AxisType::Linear, f64::NAN, 1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_check_position() {
        let axis = AxisConfig::new("Z", AxisType::Linear, 0.0, 300.0);
        assert!(axis.check_position(0.0).is_ok());
        assert!(axis.check_position(300.0).is_ok());
        assert!(matches!(
            axis.check_position(-0.5),
            Err(ValidationError::PositionOutOfRange { .. })
        ));

        let inactive = axis.with_active(false);
        assert!(matches!(
            inactive.check_position(10.0),
            Err(ValidationError::AxisInactive { .. })
        ));
    }
}
