//! # Scenario Configuration
//!
//! Robot, goal, obstacles and driver settings in one serde document,
//! loadable from YAML or JSON.
//!
//! ## Usage
//! ```rust
//! use apf_core::config::ScenarioConfig;
//!
//! let reference = ScenarioConfig::reference();
//! let scenario = reference.build().unwrap();
//! assert_eq!(scenario.obstacles.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ApfError, Result};
use crate::field::PointSource;
use crate::geometry::Position;
use crate::robot::Robot;

/// Distance to the goal at which a run counts as arrived.
pub const DEFAULT_GOAL_THRESHOLD: f64 = 0.9;
/// Step cap guarding against runs stuck in a local minimum.
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// Names accepted by [`ScenarioConfig::preset`].
pub const PRESETS: &[&str] = &["reference", "corridor", "trap"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RobotConfig {
    pub start: Position,
    /// Sensing radius; one step covers 40% of it
    pub sensor_range: f64,
    /// Candidates sampled per step
    pub num_points: usize,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self { start: Position::new(1.0, 1.0), sensor_range: 2.0, num_points: 60 }
    }
}

/// Goal or obstacle definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Position,
    #[serde(default = "default_sigma")]
    pub sigma: f64,
}

fn default_sigma() -> f64 {
    4.0
}

impl SourceConfig {
    pub fn new(x: f64, y: f64, sigma: f64) -> Self {
        Self { name: None, position: Position::new(x, y), sigma }
    }

    pub fn named(name: &str, x: f64, y: f64, sigma: f64) -> Self {
        Self { name: Some(name.to_string()), ..Self::new(x, y, sigma) }
    }

    pub fn build(&self) -> Result<PointSource> {
        PointSource::new(self.position, self.sigma)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DriverConfig {
    /// Stop once the robot is this close to the goal
    pub goal_threshold: f64,
    /// Abort after this many steps; `None` runs until arrival
    pub max_steps: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { goal_threshold: DEFAULT_GOAL_THRESHOLD, max_steps: Some(DEFAULT_MAX_STEPS) }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.goal_threshold.is_finite() || self.goal_threshold < 0.0 {
            return Err(ApfError::InvalidThreshold { threshold: self.goal_threshold });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub robot: RobotConfig,
    pub goal: SourceConfig,
    #[serde(default)]
    pub obstacles: Vec<SourceConfig>,
    #[serde(default)]
    pub driver: DriverConfig,
}

/// Validated, ready-to-run scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub robot: Robot,
    pub goal: PointSource,
    pub obstacles: Vec<PointSource>,
    pub driver: DriverConfig,
}

impl ScenarioConfig {
    /// Goal at (18, 12), four obstacles in two pairs, robot starting at (5, 5).
    pub fn reference() -> Self {
        Self {
            robot: RobotConfig { start: Position::new(5.0, 5.0), ..RobotConfig::default() },
            goal: SourceConfig::named("goal", 18.0, 12.0, 2.0),
            obstacles: vec![
                SourceConfig::named("obstacle1", 9.0, 5.0, 1.0),
                SourceConfig::named("obstacle2", 9.0, 8.0, 1.0),
                SourceConfig::named("obstacle3", 14.0, 15.0, 1.0),
                SourceConfig::named("obstacle4", 14.0, 18.0, 1.0),
            ],
            driver: DriverConfig::default(),
        }
    }

    /// Robot threading a gap between two columns of obstacles.
    pub fn corridor() -> Self {
        Self::gap(&[5.0, 6.0, 7.0], &[13.0, 14.0, 15.0], Position::new(2.0, 8.0))
    }

    /// Gap too narrow to pass: the robot settles in a local minimum in front of it.
    pub fn trap() -> Self {
        Self::gap(&[6.0, 7.0, 8.0], &[12.0, 13.0, 14.0], Position::new(2.0, 10.0))
    }

    fn gap(lower: &[f64], upper: &[f64], start: Position) -> Self {
        let mut obstacles = Vec::with_capacity(lower.len() + upper.len());
        for (i, y) in lower.iter().enumerate() {
            obstacles.push(SourceConfig::named(&format!("lower{}", i + 1), 10.0, *y, 0.8));
        }
        for (i, y) in upper.iter().enumerate() {
            obstacles.push(SourceConfig::named(&format!("upper{}", i + 1), 10.0, *y, 0.8));
        }
        Self {
            robot: RobotConfig { start, sensor_range: 2.0, num_points: 72 },
            goal: SourceConfig::named("goal", 18.0, 10.0, 3.0),
            obstacles,
            driver: DriverConfig::default(),
        }
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "reference" => Some(Self::reference()),
            "corridor" => Some(Self::corridor()),
            "trap" => Some(Self::trap()),
            _ => None,
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scenario file, choosing the parser by extension (`.yaml`, `.yml`, `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(ApfError::UnsupportedFormat { path: path.display().to_string() }),
        }
    }

    /// Validate every value and construct the runtime objects.
    pub fn build(&self) -> Result<Scenario> {
        self.driver.validate()?;
        let robot = Robot::new(self.robot.start, self.robot.sensor_range, self.robot.num_points)?;
        let goal = self.goal.build()?;
        let obstacles = self.obstacles.iter().map(SourceConfig::build).collect::<Result<Vec<_>>>()?;
        Ok(Scenario { robot, goal, obstacles, driver: self.driver.clone() })
    }
}

// ========== Tests ==========
