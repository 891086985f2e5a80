//! TRACEPOSE diagnostic records.
//!
//! A TRACEPOSE entry captures the axis state, the tool offset and the
//! resulting TCP transform for one simulation step, serialized as a single
//! JSON line.

use crate::pose::Pose;
use crate::state::MachineState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Linear axis positions keyed by axis letter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateAxes {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

/// One TRACEPOSE entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePose {
    /// Commanded axis positions (MCS)
    pub state_axes: StateAxes,
    /// Tool length offset (H)
    pub tool_offset: f64,
    /// Translation column of `T_mcs_from_tcp`
    #[serde(rename = "T_mcs_from_tcp_translation")]
    pub translation: [f64; 3],
    /// Z column of `T_mcs_from_tcp`
    pub tool_axis: [f64; 3],
    /// TCP position in MCS
    pub tcp_position_mcs: [f64; 3],
}

impl TracePose {
    /// Capture the record for `state` and the pose computed from it
    pub fn capture(state: &MachineState, pose: &Pose) -> Self {
        Self {
            state_axes: StateAxes {
                x: state.x,
                y: state.y,
                z: state.z,
            },
            tool_offset: state.tool_length_offset,
            translation: pose.translation().to_array(),
            tool_axis: pose.tool_axis().to_array(),
            tcp_position_mcs: pose.tcp_position().to_array(),
        }
    }

    /// Serialize the record as one JSON line
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Log a structured TRACEPOSE entry for debugging.
///
/// Emitted at INFO level on the `tracepose` target so it can be filtered
/// with `RUST_LOG=tracepose=info`.
pub fn log_tracepose(state: &MachineState, pose: &Pose) -> TracePose {
    let entry = TracePose::capture(state, pose);
    match entry.to_json() {
        Ok(json) => info!(target: "tracepose", "{}", json),
        Err(e) => tracing::warn!(target: "tracepose", "Failed to serialize TRACEPOSE: {}", e),
    }
    entry
}
