//! Machine controller.
//!
//! Bridges the host application (GUI or headless driver) and the simulator
//! core. It stores what the configuration forms edit, drives playback on
//! timer ticks and publishes [`SimulationEvent`]s to registered observers.

use crate::playback::{Playback, Step};
use crate::program::GcodeProgram;
use cncsim_core::{
    default_axes, log_tracepose, AxisConfig, Error, EventDispatcher, KinematicConfig,
    MachineState, Pose, Result, SimulationError, SimulationEvent, SubscriptionId, ToolParameters,
    ValidationError, WorkpieceParameters,
};
use cncsim_kinematics::forward_kinematics;
use glam::DVec3;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Controller that stores and updates machine-related state
#[derive(Debug)]
pub struct MachineController {
    axes: Vec<AxisConfig>,
    tool: ToolParameters,
    workpiece: WorkpieceParameters,
    program: GcodeProgram,
    playback: Playback,
    state: MachineState,
    // Positions of axes that do not enter the 3-axis chain (e.g. A)
    auxiliary_positions: BTreeMap<String, f64>,
    kinematics: KinematicConfig,
    tracepose: bool,
    events: EventDispatcher,
}

impl Default for MachineController {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineController {
    /// Controller with the stock axis table and default tool mounted
    pub fn new() -> Self {
        let tool = ToolParameters::default();
        let state = MachineState::default().with_tool_length_offset(tool.length_offset());
        Self {
            axes: default_axes(),
            tool,
            workpiece: WorkpieceParameters::default(),
            program: GcodeProgram::default(),
            playback: Playback::new(),
            state,
            auxiliary_positions: BTreeMap::new(),
            kinematics: KinematicConfig::default(),
            tracepose: false,
            events: EventDispatcher::new(),
        }
    }

    /// Register an observer for every event
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SimulationEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    /// Remove an observer
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Dispatcher for filtered subscriptions
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Log a TRACEPOSE record on every machine state publication
    pub fn set_tracepose_enabled(&mut self, enabled: bool) {
        self.tracepose = enabled;
    }

    pub fn tracepose_enabled(&self) -> bool {
        self.tracepose
    }

    /// Replace the axis table after validating every axis.
    ///
    /// X, Y and Z must stay configured. Current positions are clamped into
    /// the new travel limits and positions of removed axes are dropped.
    pub fn apply_axis_configuration(&mut self, axes: Vec<AxisConfig>) -> Result<()> {
        if let Err(e) = check_axis_table(&axes) {
            return Err(self.report(e.into()));
        }

        let clamp = |name: &str, value: f64| {
            axes.iter()
                .find(|a| a.name.eq_ignore_ascii_case(name))
                .map_or(value, |a| value.clamp(a.minimum, a.maximum))
        };
        let state = self
            .state
            .with_x(clamp("X", self.state.x))
            .with_y(clamp("Y", self.state.y))
            .with_z(clamp("Z", self.state.z));
        if state != self.state {
            debug!("Linear axes clamped to new limits: {:?}", state.axes());
        }
        self.state = state;

        self.auxiliary_positions
            .retain(|name, _| axes.iter().any(|a| a.name == *name));
        for (name, value) in self.auxiliary_positions.iter_mut() {
            *value = clamp(name, *value);
        }

        debug!("Applied {} axes", axes.len());
        self.axes = axes;
        self.emit_machine_state();
        Ok(())
    }

    /// Mount a tool; its length becomes the tool length offset
    pub fn apply_tool_parameters(&mut self, tool: ToolParameters) -> Result<()> {
        if let Err(e) = tool.validate() {
            return Err(self.report(e.into()));
        }
        debug!("Tool changed: {} D{} L{}", tool.tool_type, tool.diameter, tool.length);
        self.state = self.state.with_tool_length_offset(tool.length_offset());
        self.tool = tool;
        self.events.publish(SimulationEvent::ToolChanged);
        self.emit_machine_state();
        Ok(())
    }

    /// Replace the stock definition
    pub fn create_workpiece(&mut self, workpiece: WorkpieceParameters) -> Result<()> {
        if let Err(e) = workpiece.validate() {
            return Err(self.report(e.into()));
        }
        debug!(
            "Workpiece {}x{}x{} {}",
            workpiece.width, workpiece.height, workpiece.depth, workpiece.material
        );
        self.workpiece = workpiece;
        self.events.publish(SimulationEvent::WorkpieceUpdated);
        Ok(())
    }

    /// Load program text and rewind playback; a running playback continues
    /// from the first line of the new program
    pub fn load_gcode_text(&mut self, text: &str) {
        self.set_program(GcodeProgram::from_text(text));
    }

    /// Load a program file; read failures are reported as file errors
    pub fn load_gcode_file(&mut self, path: &Path) -> Result<()> {
        match GcodeProgram::load_file(path) {
            Ok(program) => {
                self.set_program(program);
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    fn set_program(&mut self, program: GcodeProgram) {
        self.program = program;
        self.playback.rewind(self.program.len());
        info!("Loaded program with {} lines", self.program.len());
        self.events.publish(SimulationEvent::GcodeLoaded {
            line_count: self.program.len(),
        });
    }

    /// Start or resume playback at `speed` percent
    pub fn start_simulation(&mut self, speed: u32) -> Result<()> {
        if self.program.is_empty() {
            return Err(self.report(SimulationError::NoProgram.into()));
        }
        if self.playback.start(speed) {
            info!("Simulation started at {}% ({:?} per line)", speed, self.playback.interval());
            self.events.publish(SimulationEvent::SimulationStarted);
        }
        Ok(())
    }

    pub fn pause_simulation(&mut self) {
        if self.playback.pause() {
            info!("Simulation paused at line {}", self.playback.current());
            self.events.publish(SimulationEvent::SimulationPaused);
        }
    }

    /// Halt playback and rewind to the first line
    pub fn stop_simulation(&mut self) {
        self.playback.stop();
        info!("Simulation stopped");
        self.events.publish(SimulationEvent::SimulationStopped);
        self.events.publish(SimulationEvent::SimulationProgress {
            current: 0,
            total: self.program.len(),
        });
    }

    /// Timer tick: advance one line
    pub fn advance_simulation(&mut self) -> Step {
        let step = self.playback.advance();
        match step {
            Step::Progress { current, total } => {
                self.events
                    .publish(SimulationEvent::SimulationProgress { current, total });
                self.emit_machine_state();
            }
            Step::Finished => self.stop_simulation(),
            Step::Inactive => {}
        }
        step
    }

    pub fn is_simulation_running(&self) -> bool {
        self.playback.is_running()
    }

    /// How often the host should call [`MachineController::advance_simulation`]
    pub fn tick_interval(&self) -> Duration {
        self.playback.interval()
    }

    /// `(current, total)` lines
    pub fn progress(&self) -> (usize, usize) {
        (self.playback.current(), self.playback.total())
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Move an axis (slider input).
    ///
    /// The axis must be configured, active and the value within its limits.
    pub fn set_axis_position(&mut self, axis: &str, value: f64) -> Result<()> {
        let checked = match self.axes.iter().find(|a| a.name.eq_ignore_ascii_case(axis)) {
            Some(config) => config.check_position(value).map(|_| config.name.clone()),
            None => Err(ValidationError::UnknownAxis {
                axis: axis.to_string(),
            }),
        };
        let name = match checked {
            Ok(name) => name,
            Err(e) => return Err(self.report(e.into())),
        };

        self.state = match name.to_ascii_uppercase().as_str() {
            "X" => self.state.with_x(value),
            "Y" => self.state.with_y(value),
            "Z" => self.state.with_z(value),
            _ => {
                self.auxiliary_positions.insert(name, value);
                self.state
            }
        };
        self.emit_machine_state();
        Ok(())
    }

    /// Override the tool length offset (H)
    pub fn set_tool_length_offset(&mut self, offset: f64) {
        self.state = self.state.with_tool_length_offset(offset);
        self.emit_machine_state();
    }

    pub fn machine_state(&self) -> MachineState {
        self.state
    }

    /// Forward kinematics of the current state
    pub fn current_pose(&self) -> Pose {
        forward_kinematics(&self.state, &self.kinematics)
    }

    /// Tool center point in MCS
    pub fn tcp_position(&self) -> DVec3 {
        self.current_pose().tcp_position()
    }

    pub fn axis_configuration(&self) -> &[AxisConfig] {
        &self.axes
    }

    pub fn tool_parameters(&self) -> &ToolParameters {
        &self.tool
    }

    pub fn workpiece(&self) -> &WorkpieceParameters {
        &self.workpiece
    }

    pub fn kinematic_config(&self) -> &KinematicConfig {
        &self.kinematics
    }

    pub fn current_gcode(&self) -> String {
        self.program.text()
    }

    pub fn program(&self) -> &GcodeProgram {
        &self.program
    }

    /// Positions of the active axes; X, Y and Z are always present
    pub fn axis_positions(&self) -> BTreeMap<String, f64> {
        let mut positions: BTreeMap<String, f64> = self
            .axes
            .iter()
            .filter(|a| a.active)
            .map(|a| (a.name.clone(), self.position_of(&a.name)))
            .collect();
        for (name, value) in [("X", self.state.x), ("Y", self.state.y), ("Z", self.state.z)] {
            positions.entry(name.to_string()).or_insert(value);
        }
        positions
    }

    fn position_of(&self, axis: &str) -> f64 {
        match axis.to_ascii_uppercase().as_str() {
            "X" => self.state.x,
            "Y" => self.state.y,
            "Z" => self.state.z,
            _ => self.auxiliary_positions.get(axis).copied().unwrap_or(0.0),
        }
    }

    fn emit_machine_state(&self) {
        let pose = self.current_pose();
        if self.tracepose {
            log_tracepose(&self.state, &pose);
        }
        self.events.publish(SimulationEvent::MachineStateChanged {
            positions: self.axis_positions(),
            tcp: pose.tcp_position(),
        });
    }

    /// Publish an error to observers and hand it back to the caller
    fn report(&self, error: Error) -> Error {
        warn!("{}: {}", error.title(), error);
        self.events.publish(SimulationEvent::ErrorOccurred {
            title: error.title().to_string(),
            message: error.to_string(),
        });
        error
    }
}

/// Every axis must be valid and the linear chain axes present
fn check_axis_table(axes: &[AxisConfig]) -> std::result::Result<(), ValidationError> {
    axes.iter().try_for_each(AxisConfig::validate)?;
    for name in ["X", "Y", "Z"] {
        if !axes.iter().any(|a| a.name.eq_ignore_ascii_case(name)) {
            return Err(ValidationError::UnknownAxis {
                axis: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_controller_mounts_default_tool() {
        let controller = MachineController::new();
        assert_eq!(controller.machine_state().tool_length_offset, 50.0);
        assert_eq!(controller.tcp_position(), DVec3::new(0.0, 0.0, -50.0));
        assert!(!controller.is_simulation_running());
        assert_eq!(controller.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_axis_positions_cover_active_axes() {
        let mut controller = MachineController::new();
        let positions = controller.axis_positions();
        assert_eq!(positions.keys().cloned().collect::<Vec<_>>(), vec!["X", "Y", "Z"]);

        let mut axes = default_axes();
        axes[3].active = true;
        controller.apply_axis_configuration(axes).unwrap();
        controller.set_axis_position("A", 90.0).unwrap();
        assert_eq!(controller.axis_positions().get("A"), Some(&90.0));
        // Rotary positions do not move the 3-axis TCP
        assert_eq!(controller.tcp_position(), DVec3::new(0.0, 0.0, -50.0));
    }

    #[test]
    fn test_set_axis_position_is_case_insensitive() {
        let mut controller = MachineController::new();
        controller.set_axis_position("x", 12.5).unwrap();
        assert_eq!(controller.machine_state().x, 12.5);
    }

    #[test]
    fn test_start_without_program_fails() {
        let mut controller = MachineController::new();
        let err = controller.start_simulation(100).unwrap_err();
        assert!(matches!(err, Error::Simulation(SimulationError::NoProgram)));
        assert!(!controller.is_simulation_running());
    }
}
