//! Forward kinematics for a 3-axis VMC.
//!
//! The transform chain is
//!
//! ```text
//! T_mcs_from_tcp = T_mcs_from_spindle · T_spindle_from_tcp
//!                = translate(x, y, z) · translate(0, 0, -H)
//! ```
//!
//! so the tool tip sits `H` millimeters below the spindle nose along the
//! tool axis. A negative `H` is not special-cased: it puts the TCP above the
//! spindle nose (`z_tcp = z - H > z`).

use crate::KinematicModel;
use cncsim_core::{KinematicConfig, MachineState, Pose};
use glam::{DMat4, DVec3};
use tracing::trace;

/// Create a homogeneous translation matrix (millimeters)
pub fn translation(x: f64, y: f64, z: f64) -> DMat4 {
    DMat4::from_translation(DVec3::new(x, y, z))
}

/// Compute `T_mcs_from_tcp` for a 3-axis VMC.
///
/// Accounts for the linear X/Y/Z positions and the tool length offset (H)
/// as a translation along tool −Z. `config` carries no parameters for this
/// machine and does not affect the result.
///
/// # Example
/// ```
/// use cncsim_core::{KinematicConfig, MachineState};
/// use cncsim_kinematics::forward_kinematics;
///
/// let state = MachineState::new(100.0, 50.0, -20.0, 10.0);
/// let pose = forward_kinematics(&state, &KinematicConfig::default());
/// let tcp = pose.transform_point(&[0.0, 0.0, 0.0, 1.0]).unwrap();
/// assert_eq!(tcp.to_array(), [100.0, 50.0, -30.0, 1.0]);
/// ```
pub fn forward_kinematics(state: &MachineState, _config: &KinematicConfig) -> Pose {
    ThreeAxisVmc.forward(state)
}

/// Vertical machining center with three linear axes
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeAxisVmc;

impl KinematicModel for ThreeAxisVmc {
    fn name(&self) -> &str {
        "3-axis VMC"
    }

    fn forward(&self, state: &MachineState) -> Pose {
        let t_mcs_from_spindle = translation(state.x, state.y, state.z);
        let t_spindle_from_tcp = translation(0.0, 0.0, -state.tool_length_offset);
        let pose = Pose::new(t_mcs_from_spindle * t_spindle_from_tcp);
        trace!(
            "FK {}: ({}, {}, {}) H={} -> TCP {:?}",
            self.name(),
            state.x,
            state.y,
            state.z,
            state.tool_length_offset,
            pose.tcp_position()
        );
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    fn tcp(state: MachineState) -> [f64; 4] {
        forward_kinematics(&state, &KinematicConfig::default())
            .transform_point(&[0.0, 0.0, 0.0, 1.0])
            .unwrap()
            .to_array()
    }

    #[test]
    fn test_tool_length_offset() {
        assert_eq!(tcp(MachineState::new(0.0, 0.0, 0.0, 30.0)), [0.0, 0.0, -30.0, 1.0]);
    }

    #[test]
    fn test_xyz_movement() {
        assert_eq!(
            tcp(MachineState::new(100.0, 50.0, -20.0, 10.0)),
            [100.0, 50.0, -30.0, 1.0]
        );
    }

    #[test]
    fn test_zero_state_is_identity() {
        let pose = forward_kinematics(&MachineState::default(), &KinematicConfig::new());
        assert_eq!(pose.matrix(), DMat4::IDENTITY);
        assert_eq!(tcp(MachineState::default()), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_negative_offset_raises_tcp() {
        assert_eq!(tcp(MachineState::new(0.0, 0.0, 10.0, -5.0)), [0.0, 0.0, 15.0, 1.0]);
    }

    #[test]
    fn test_translation_matrix() {
        let m = translation(1.0, 2.0, 3.0);
        assert_eq!(m.w_axis, DVec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(m.x_axis, DVec4::X);
        assert_eq!(m.y_axis, DVec4::Y);
        assert_eq!(m.z_axis, DVec4::Z);
    }

    #[test]
    fn test_pose_is_rigid_with_vertical_tool_axis() {
        let pose = ThreeAxisVmc.forward(&MachineState::new(-120.0, 33.3, 250.0, 75.0));
        assert!(pose.is_rigid(1e-12));
        assert_eq!(pose.tool_axis(), DVec3::Z);
        assert_eq!(pose.translation(), DVec3::new(-120.0, 33.3, 175.0));
        assert_eq!(ThreeAxisVmc.name(), "3-axis VMC");
    }
}
