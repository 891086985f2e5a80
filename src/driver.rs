//! Headless host for the controller.
//!
//! Plays the role of the GUI event loop: a periodic timer ticks the
//! controller until the program finishes or shutdown is requested.

use cncsim_controller::{MachineController, Step};
use cncsim_core::{KinematicConfig, MachineState, TracePose};
use cncsim_kinematics::{KinematicModel, ThreeAxisVmc};
use glam::DVec3;
use serde::Serialize;
use std::future::Future;
use tokio::time::{self, MissedTickBehavior};
use tracing::info;

/// Outcome of a playback run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSummary {
    /// Lines processed before the run ended
    pub lines_processed: usize,
    /// Whether the end of the program was reached
    pub completed: bool,
    /// TCP at the end of the run
    pub final_tcp: DVec3,
}

/// Play the loaded program at `speed` percent.
///
/// Returns early, leaving playback paused, once `shutdown` resolves.
pub async fn run_playback<F>(
    controller: &mut MachineController,
    speed: u32,
    shutdown: F,
) -> cncsim_core::Result<PlaybackSummary>
where
    F: Future<Output = ()>,
{
    controller.start_simulation(speed)?;

    let mut ticker = time::interval(controller.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut lines_processed = 0;
    let completed = loop {
        tokio::select! {
            _ = &mut shutdown => {
                controller.pause_simulation();
                info!("Playback interrupted after {} lines", lines_processed);
                break false;
            }
            _ = ticker.tick() => match controller.advance_simulation() {
                Step::Progress { current, .. } => lines_processed = current,
                Step::Finished => break true,
                Step::Inactive => break false,
            },
        }
    };

    Ok(PlaybackSummary {
        lines_processed,
        completed,
        final_tcp: controller.tcp_position(),
    })
}

/// Everything a viewport needs for one machine state
#[derive(Debug, Clone, Serialize)]
pub struct PoseReport {
    /// Kinematic model name
    pub model: String,
    /// TCP as a homogeneous MCS point
    pub tcp_position_mcs: [f64; 4],
    /// Column-major matrix for the renderer
    pub gl_matrix: [f64; 16],
    /// Diagnostic record
    pub tracepose: TracePose,
}

/// Compute the pose for `state` and collect its exports
pub fn pose_report(state: &MachineState, config: &KinematicConfig) -> PoseReport {
    let model = ThreeAxisVmc;
    let pose = cncsim_kinematics::forward_kinematics(state, config);
    PoseReport {
        model: model.name().to_string(),
        tcp_position_mcs: pose.transform_vec4(glam::DVec4::W).to_array(),
        gl_matrix: pose.to_gl_array(),
        tracepose: TracePose::capture(state, &pose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cncsim_core::{SimulationEvent, ToolParameters};
    use cncsim_settings::Config;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn controller_from(config: &Config) -> MachineController {
        let mut controller = MachineController::new();
        controller.set_tracepose_enabled(config.simulation.tracepose);
        controller
            .apply_axis_configuration(config.machine.axes.clone())
            .unwrap();
        controller.apply_tool_parameters(config.tool.clone()).unwrap();
        controller.create_workpiece(config.workpiece.clone()).unwrap();
        controller
    }

    #[tokio::test]
    async fn test_run_playback_to_completion() {
        let mut controller = MachineController::new();
        controller.load_gcode_text("G0 X0\nG1 X1\nM30");

        let summary = run_playback(&mut controller, 200, std::future::pending())
            .await
            .unwrap();
        assert!(summary.completed);
        assert_eq!(summary.lines_processed, 3);
        assert_eq!(summary.final_tcp, DVec3::new(0.0, 0.0, -50.0));
        assert!(!controller.is_simulation_running());
    }

    #[tokio::test]
    async fn test_run_playback_interrupted() {
        let mut controller = MachineController::new();
        controller.load_gcode_text("G0 X0\nG1 X1\nM30");

        let summary = run_playback(&mut controller, 100, async {})
            .await
            .unwrap();
        assert!(!summary.completed);
        assert_eq!(controller.progress().1, 3);
    }

    #[tokio::test]
    async fn test_run_playback_without_program() {
        let mut controller = MachineController::new();
        let err = run_playback(&mut controller, 100, std::future::pending())
            .await
            .unwrap_err();
        assert!(err.is_simulation_error());
    }

    #[tokio::test]
    async fn test_configured_run_reaches_end() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        let program_path = dir.path().join("part.nc");

        let mut config = Config::default();
        config.tool = ToolParameters {
            length: 75.0,
            ..ToolParameters::default()
        };
        config.simulation.speed = 200;
        config.simulation.tracepose = true;
        config.save_to_file(&config_path).unwrap();
        std::fs::write(&program_path, "G21\n\nG0 Z5\nG1 X10 F300\nM30\n").unwrap();

        let config = Config::load_or_default(&config_path).unwrap();
        let mut controller = controller_from(&config);
        assert!(controller.tracepose_enabled());
        controller.load_gcode_file(&program_path).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.subscribe(move |event| {
            if let SimulationEvent::SimulationProgress { current, .. } = event {
                sink.lock().push(*current);
            }
        });

        let summary = run_playback(&mut controller, config.simulation.speed, std::future::pending())
            .await
            .unwrap();

        assert!(summary.completed);
        assert_eq!(summary.lines_processed, 4);
        assert_eq!(summary.final_tcp.z, -75.0);
        // 1..=4 while playing, then the rewind on stop
        assert_eq!(*seen.lock(), vec![1, 2, 3, 4, 0]);
    }

    #[tokio::test]
    async fn test_missing_program_is_file_error() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());

        let mut controller = controller_from(&config);
        let err = controller
            .load_gcode_file(&dir.path().join("missing.nc"))
            .unwrap_err();
        assert_eq!(err.title(), "File error");

        let err = run_playback(&mut controller, 100, std::future::pending())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Load G-code before starting.");
    }

    #[test]
    fn test_pose_report() {
        let report = pose_report(
            &MachineState::new(100.0, 50.0, -20.0, 10.0),
            &KinematicConfig::default(),
        );
        assert_eq!(report.model, "3-axis VMC");
        assert_eq!(report.tcp_position_mcs, [100.0, 50.0, -30.0, 1.0]);
        assert_eq!(&report.gl_matrix[12..], &[100.0, 50.0, -30.0, 1.0]);
        assert_eq!(report.tracepose.tool_offset, 10.0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["tracepose"]["tcp_position_mcs"][2], -30.0);
    }
}
