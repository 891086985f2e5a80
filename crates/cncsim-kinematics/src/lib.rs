//! # CNCSim Kinematics
//!
//! Forward kinematics: machine axis positions and tool offset in,
//! `T_mcs_from_tcp` out.
//!
//! Machine models implement [`KinematicModel`]. Only the 3-axis vertical
//! machining center exists today; rotary models plug in through the same
//! trait together with the parameters carried by
//! [`cncsim_core::KinematicConfig`].

pub mod three_axis;

use cncsim_core::{MachineState, Pose};

pub use three_axis::{forward_kinematics, translation, ThreeAxisVmc};

/// A machine model that maps an axis state to the TCP pose
pub trait KinematicModel {
    /// Human readable model name
    fn name(&self) -> &str;

    /// Compute `T_mcs_from_tcp` for `state`
    fn forward(&self, state: &MachineState) -> Pose;
}
