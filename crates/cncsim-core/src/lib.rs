//! # CNCSim Core
//!
//! Core types and utilities for CNCSim.
//! Provides the machine state and pose abstractions, the TRACEPOSE
//! diagnostic record, domain data models and the event dispatcher used by
//! the controller.

pub mod data;
pub mod error;
pub mod event;
pub mod pose;
pub mod state;
pub mod tracepose;

pub use data::{
    default_axes, AxisConfig, AxisType, Material, ToolParameters, ToolType, WorkpieceParameters,
    ZeroPoint,
};

pub use error::{Error, PoseError, Result, SimulationError, ValidationError};

pub use event::{EventCategory, EventDispatcher, SimulationEvent, SubscriptionId};

pub use pose::{GlMatrixTarget, Pose};

pub use state::{KinematicConfig, MachineState};

pub use tracepose::{log_tracepose, TracePose};
