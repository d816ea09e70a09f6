//! apf CLI
//!
//! Runs potential field planning scenarios and exports their trajectories.

use anyhow::{bail, Context, Result};
use apf_core::config::PRESETS;
use apf_core::{RunReport, ScenarioConfig, Simulation, StepRecord};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apf")]
#[command(version, about = "Artificial potential field motion planner", long_about = None)]
struct Cli {
    /// Log planner decisions (repeat for per-ring traces)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario until the robot reaches the goal
    Run {
        /// Scenario file (.yaml, .yml or .json); overrides --preset
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Built-in scenario name
        #[arg(long, default_value = "reference")]
        preset: String,

        /// Write the trajectory as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Write the trajectory as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Override the step limit (0 = unlimited)
        #[arg(long)]
        max_steps: Option<usize>,

        /// Override the arrival distance
        #[arg(long)]
        threshold: Option<f64>,

        /// Pause between steps, in milliseconds
        #[arg(long, default_value = "0")]
        frame_delay_ms: u64,

        /// Print one line per step
        #[arg(long, default_value = "false")]
        print_steps: bool,
    },

    /// Print a built-in scenario as a file template
    Scenario {
        /// Built-in scenario name
        #[arg(long, default_value = "reference")]
        preset: String,

        #[arg(long, value_enum, default_value = "yaml")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "apf_core=debug,info",
        _ => "apf_core=trace,info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn preset(name: &str) -> Result<ScenarioConfig> {
    match ScenarioConfig::preset(name) {
        Some(cfg) => Ok(cfg),
        None => bail!("unknown preset '{}' (available: {})", name, PRESETS.join(", ")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            scenario,
            preset: preset_name,
            json,
            csv,
            max_steps,
            threshold,
            frame_delay_ms,
            print_steps,
        } => {
            let mut cfg = match &scenario {
                Some(path) => ScenarioConfig::load(path)
                    .with_context(|| format!("failed to load scenario {}", path.display()))?,
                None => preset(&preset_name)?,
            };
            if let Some(limit) = max_steps {
                cfg.driver.max_steps = if limit == 0 { None } else { Some(limit) };
            }
            if let Some(t) = threshold {
                cfg.driver.goal_threshold = t;
            }

            let source = match &scenario {
                Some(path) => path.display().to_string(),
                None => format!("preset '{}'", preset_name),
            };
            println!("Running {}", source);
            println!("   Robot:     ({:.2}, {:.2})", cfg.robot.start.x, cfg.robot.start.y);
            println!("   Goal:      ({:.2}, {:.2})", cfg.goal.position.x, cfg.goal.position.y);
            println!("   Obstacles: {}", cfg.obstacles.len());

            let built = cfg.build().context("invalid scenario")?;
            let mut sim = Simulation::from_scenario(built);
            let delay = Duration::from_millis(frame_delay_ms);
            let report = sim.run_with(|record| {
                if print_steps {
                    print_step(record);
                }
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            });

            print_report(&report);

            if let Some(path) = json {
                report
                    .trajectory
                    .write_json(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                saved(&path);
            }
            if let Some(path) = csv {
                report
                    .trajectory
                    .write_csv(&path)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                saved(&path);
            }
        }

        Commands::Scenario { preset: preset_name, format } => {
            let cfg = preset(&preset_name)?;
            let text = match format {
                Format::Yaml => cfg.to_yaml_string()?,
                Format::Json => cfg.to_json_string()?,
            };
            println!("{}", text);
        }
    }

    Ok(())
}

fn print_step(record: &StepRecord) {
    let status = match record.outcome.candidate_index() {
        Some(i) => format!("solution exists (candidate {})", i),
        None => "no solution exists".to_string(),
    };
    println!(
        "{:>5}  ({:>8.3}, {:>8.3})  d={:>7.3}  J={:>9.5}  {}",
        record.step,
        record.position.x,
        record.position.y,
        record.distance_to_goal,
        record.total_cost,
        status
    );
}

fn print_report(report: &RunReport) {
    if report.reached_goal() {
        println!("\nGoal reached in {} steps", report.steps);
    } else {
        println!("\nStep limit reached after {} steps", report.steps);
    }
    println!("   Stalled steps:  {}", report.stalls);
    println!(
        "   Final position: ({:.3}, {:.3})",
        report.final_position.x, report.final_position.y
    );
    println!("   Distance left:  {:.3}", report.final_distance);
    println!("   Path length:    {:.3}", report.trajectory.path_length());
}

fn saved(path: &Path) {
    println!("Saved {}", path.display());
}
