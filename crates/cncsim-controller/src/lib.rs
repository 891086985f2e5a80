//! # CNCSim Controller
//!
//! Headless stand-in for the simulator GUI: machine, tool and workpiece
//! configuration, opaque G-code programs and timer-driven playback, with
//! results published to observers.

pub mod controller;
pub mod playback;
pub mod program;

pub use controller::MachineController;
pub use playback::{interval_for_speed, Playback, PlaybackState, Step, DEFAULT_SPEED};
pub use program::GcodeProgram;
