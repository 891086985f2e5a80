//! Machine state and kinematic configuration.
//!
//! A [`MachineState`] is the axis snapshot handed to forward kinematics for a
//! single simulation step. It has no lifecycle beyond the call that turns it
//! into a [`crate::Pose`].

use serde::{Deserialize, Serialize};

/// Machine axis positions and tool offset.
///
/// Linear positions are in millimeters in the machine coordinate system
/// (MCS). The tool length offset (H) is measured in millimeters along the
/// tool axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineState {
    /// X axis position (mm, MCS)
    pub x: f64,
    /// Y axis position (mm, MCS)
    pub y: f64,
    /// Z axis position (mm, MCS)
    pub z: f64,
    /// Tool length offset (mm)
    pub tool_length_offset: f64,
}

impl MachineState {
    /// Create a state from axis positions and a tool length offset
    pub fn new(x: f64, y: f64, z: f64, tool_length_offset: f64) -> Self {
        Self {
            x,
            y,
            z,
            tool_length_offset,
        }
    }

    /// Copy of this state with a different X position
    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    /// Copy of this state with a different Y position
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Copy of this state with a different Z position
    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Copy of this state with a different tool length offset
    pub fn with_tool_length_offset(self, tool_length_offset: f64) -> Self {
        Self {
            tool_length_offset,
            ..self
        }
    }

    /// Linear axis positions as `[x, y, z]`
    pub fn axes(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Kinematic configuration.
///
/// Carries no parameters for the 3-axis machine. Rotary axis parameters
/// (A/B/C axes and their pivot offsets) will be added here, so the struct is
/// non-exhaustive and must be built through [`KinematicConfig::new`] or
/// `Default`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct KinematicConfig {}

impl KinematicConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }
}
