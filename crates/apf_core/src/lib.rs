//! # apf_core - Artificial Potential Field Motion Planner
//!
//! A single robot plans its way across the plane toward a goal while
//! avoiding obstacles. Each step it samples a ring of candidate positions,
//! scores them against a Gaussian potential field, and commits to one.
//!
//! ## Features
//! - 100% deterministic planning (same inputs = same trajectory)
//! - Greedy distance-to-goal preference with a potential veto
//! - YAML/JSON scenario files
//! - JSON/CSV trajectory export

pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod planner;
pub mod robot;
pub mod sim;

pub use config::{DriverConfig, RobotConfig, Scenario, ScenarioConfig, SourceConfig};
pub use error::{ApfError, Result};
pub use field::{attractive, repulsive, total, PointSource};
pub use geometry::Position;
pub use planner::{Candidate, CandidateRing, Selection};
pub use robot::{MoveOutcome, PlanPhase, Robot};
pub use sim::{RunReport, RunStatus, Simulation, StepRecord, Trajectory};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_run() {
        let scenario = ScenarioConfig::reference().build().unwrap();
        let report = Simulation::from_scenario(scenario).run();
        assert!(report.reached_goal());
        assert!(report.final_distance <= 0.9);
    }

    #[test]
    fn test_determinism() {
        let run = || Simulation::from_scenario(ScenarioConfig::reference().build().unwrap()).run();
        let a = run();
        let b = run();
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.trajectory, b.trajectory);
    }
}
