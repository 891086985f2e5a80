//! Tool definitions
//!
//! The active tool's geometry. Its overall length becomes the tool length
//! offset used by forward kinematics.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Tool types for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
pub enum ToolType {
    /// Flat end mill
    #[default]
    FlatEndmill,
    /// Ball end mill / ball nose
    BallEndmill,
    /// Twist drill
    Drill,
    /// Chamfer tool
    Chamfer,
}

impl std::fmt::Display for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlatEndmill => write!(f, "Flat Endmill"),
            Self::BallEndmill => write!(f, "Ball Endmill"),
            Self::Drill => write!(f, "Drill"),
            Self::Chamfer => write!(f, "Chamfer"),
        }
    }
}

/// Geometry of the mounted tool, all lengths in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameters {
    /// Tool type
    #[serde(default)]
    pub tool_type: ToolType,
    /// Cutting diameter
    pub diameter: f64,
    /// Overall length from the spindle nose
    pub length: f64,
    /// Length of the fluted section
    pub cutting_length: f64,
    /// Shank diameter
    pub shank_diameter: f64,
    /// Number of flutes
    pub flutes: u32,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self {
            tool_type: ToolType::FlatEndmill,
            diameter: 10.0,
            length: 50.0,
            cutting_length: 40.0,
            shank_diameter: 12.0,
            flutes: 4,
        }
    }
}

impl ToolParameters {
    /// Validate tool geometry.
    ///
    /// The diameter must be positive and the overall length may not be
    /// shorter than the cutting length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.diameter.is_nan() || self.diameter <= 0.0 {
            return Err(ValidationError::ToolDiameter {
                diameter: self.diameter,
            });
        }
        if self.length.is_nan() || self.cutting_length.is_nan() || self.length < self.cutting_length
        {
            return Err(ValidationError::ToolLength {
                length: self.length,
                cutting_length: self.cutting_length,
            });
        }
        Ok(())
    }

    /// Tool length offset (H) contributed by this tool
    pub fn length_offset(&self) -> f64 {
        self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_valid() {
        let tool = ToolParameters::default();
        assert!(tool.validate().is_ok());
        assert_eq!(tool.length_offset(), 50.0);
        assert_eq!(tool.tool_type.to_string(), "Flat Endmill");
    }

    #[test]
    fn test_rejects_non_positive_diameter() {
        let tool = ToolParameters {
            diameter: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            tool.validate(),
            Err(ValidationError::ToolDiameter { .. })
        ));
    }

    #[test]
    fn test_length_equal_to_cutting_length_is_allowed() {
        let tool = ToolParameters {
            length: 40.0,
            cutting_length: 40.0,
            ..Default::default()
        };
        assert!(tool.validate().is_ok());

        let short = ToolParameters {
            length: 30.0,
            ..tool
        };
        assert_eq!(
            short.validate(),
            Err(ValidationError::ToolLength {
                length: 30.0,
                cutting_length: 40.0
            })
        );
    }
}
