//! Workpiece stock definition.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Aluminum,
    Steel,
    Wood,
    Plastic,
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aluminum => write!(f, "Aluminum"),
            Self::Steel => write!(f, "Steel"),
            Self::Wood => write!(f, "Wood"),
            Self::Plastic => write!(f, "Plastic"),
        }
    }
}

/// Where the program zero sits on the stock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPoint {
    #[default]
    TopCenter,
    TopLeft,
    BottomCenter,
}

impl fmt::Display for ZeroPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopCenter => write!(f, "Top Center"),
            Self::TopLeft => write!(f, "Top Left"),
            Self::BottomCenter => write!(f, "Bottom Center"),
        }
    }
}

/// Rectangular stock, dimensions in millimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkpieceParameters {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub zero_point: ZeroPoint,
}

impl Default for WorkpieceParameters {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 100.0,
            depth: 50.0,
            material: Material::default(),
            zero_point: ZeroPoint::default(),
        }
    }
}

impl WorkpieceParameters {
    /// Every dimension must be strictly positive
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (dimension, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ValidationError::WorkpieceDimension {
                    dimension: dimension.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Stock volume in cubic millimeters
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }
}
