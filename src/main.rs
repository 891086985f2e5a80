//! CNCSim command line host.
//!
//! - `run`: play a G-code program against the configured machine
//! - `pose`: print the pose exports for one machine state as JSON
//! - `init-config`: write the default configuration file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cncsim::driver::{pose_report, run_playback};
use cncsim::{
    init_logging, Config, EventCategory, KinematicConfig, LogFormat, MachineController,
    MachineState, SimulationEvent, BUILD_DATE, BUILD_PROFILE, VERSION,
};

/// Headless 3-axis CNC machine simulator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file (JSON or TOML). Defaults to the platform config dir.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a G-code program.
    Run {
        /// Program file.
        program: PathBuf,

        /// Playback speed in percent. Overrides the configured value.
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=200))]
        speed: Option<u32>,

        /// Log a TRACEPOSE record for every machine state change.
        #[arg(long)]
        tracepose: bool,
    },

    /// Print the pose for one machine state.
    Pose {
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        y: f64,
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        z: f64,
        /// Tool length offset (H).
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,
    },

    /// Write the default configuration file.
    InitConfig {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;
    tracing::debug!("CNCSim {} ({} build, {})", VERSION, BUILD_PROFILE, BUILD_DATE);

    match cli.command {
        Commands::Run {
            program,
            speed,
            tracepose,
        } => {
            let config_path = resolve_config_path(cli.config)?;
            run(&config_path, &program, speed, tracepose).await
        }
        Commands::Pose { x, y, z, offset } => {
            let report = pose_report(
                &MachineState::new(x, y, z, offset),
                &KinematicConfig::default(),
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Commands::InitConfig { force } => {
            let config_path = resolve_config_path(cli.config)?;
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to replace it)",
                    config_path.display()
                );
            }
            Config::default().save_to_file(&config_path)?;
            println!("Wrote {}", config_path.display());
            Ok(())
        }
    }
}

/// Explicit `--config` path, else the platform default
fn resolve_config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(Config::default_path()?),
    }
}

async fn run(
    config_path: &Path,
    program: &Path,
    speed: Option<u32>,
    tracepose: bool,
) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;

    let mut controller = MachineController::new();
    controller.set_tracepose_enabled(tracepose || config.simulation.tracepose);
    controller.apply_axis_configuration(config.machine.axes)?;
    controller.apply_tool_parameters(config.tool)?;
    controller.create_workpiece(config.workpiece)?;

    controller
        .events()
        .subscribe_filtered(&[EventCategory::Playback], |event| {
            if let SimulationEvent::SimulationProgress { current, total } = event {
                tracing::debug!("Line {}/{}", current, total);
            }
        });

    controller.load_gcode_file(program)?;

    let speed = speed.unwrap_or(config.simulation.speed);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = run_playback(&mut controller, speed, shutdown).await?;
    let tcp = summary.final_tcp;
    if summary.completed {
        println!(
            "Finished {} lines, TCP at ({:.3}, {:.3}, {:.3})",
            summary.lines_processed, tcp.x, tcp.y, tcp.z
        );
    } else {
        println!(
            "Stopped after {} of {} lines, TCP at ({:.3}, {:.3}, {:.3})",
            summary.lines_processed,
            controller.program().len(),
            tcp.x,
            tcp.y,
            tcp.z
        );
    }

    Ok(())
}
