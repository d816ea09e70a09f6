//! Simulation driver: steps the robot until it reaches the goal.
//!
//! The loop continues while the robot is farther than `goal_threshold` from
//! the goal. A stalled step (no improving candidate) is not fatal; the loop
//! simply tries again, so `max_steps` is the only way out of a local minimum.

use serde::Serialize;
use tracing::{info, warn};

use super::trajectory::{StepRecord, Trajectory};
use crate::config::{DriverConfig, Scenario};
use crate::field::{total, PointSource};
use crate::geometry::Position;
use crate::robot::Robot;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    ReachedGoal,
    StepLimitReached,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub steps: usize,
    pub stalls: usize,
    pub final_position: Position,
    pub final_distance: f64,
    pub trajectory: Trajectory,
}

impl RunReport {
    pub fn reached_goal(&self) -> bool {
        self.status == RunStatus::ReachedGoal
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    robot: Robot,
    goal: PointSource,
    obstacles: Vec<PointSource>,
    config: DriverConfig,
    steps_taken: usize,
}

impl Simulation {
    pub fn new(
        robot: Robot,
        goal: PointSource,
        obstacles: Vec<PointSource>,
        config: DriverConfig,
    ) -> Self {
        Self { robot, goal, obstacles, config, steps_taken: 0 }
    }

    pub fn from_scenario(scenario: Scenario) -> Self {
        Self::new(scenario.robot, scenario.goal, scenario.obstacles, scenario.driver)
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn goal(&self) -> &PointSource {
        &self.goal
    }

    pub fn obstacles(&self) -> &[PointSource] {
        &self.obstacles
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn distance_to_goal(&self) -> f64 {
        self.robot.distance_to(&self.goal)
    }

    pub fn at_goal(&self) -> bool {
        self.distance_to_goal() <= self.config.goal_threshold
    }

    /// One decide/take cycle.
    pub fn step(&mut self) -> StepRecord {
        let from = self.robot.position();
        self.robot.decide_next_move(&self.goal, &self.obstacles);
        let outcome = self.robot.take_next_move();
        self.steps_taken += 1;

        let position = self.robot.position();
        StepRecord {
            step: self.steps_taken,
            from,
            outcome,
            position,
            distance_to_goal: self.distance_to_goal(),
            total_cost: total(&position, &self.goal, &self.obstacles),
        }
    }

    pub fn run(&mut self) -> RunReport {
        self.run_with(|_| {})
    }

    /// Run to completion, handing every step to `observer` (rendering, logging).
    pub fn run_with<F>(&mut self, mut observer: F) -> RunReport
    where
        F: FnMut(&StepRecord),
    {
        let start = self.robot.position();
        let mut trajectory = Trajectory::new(start);
        info!(
            x = start.x,
            y = start.y,
            distance = self.distance_to_goal(),
            threshold = self.config.goal_threshold,
            obstacles = self.obstacles.len(),
            "simulation started"
        );

        let status = loop {
            if self.at_goal() {
                break RunStatus::ReachedGoal;
            }
            if let Some(limit) = self.config.max_steps {
                if trajectory.len() >= limit {
                    warn!(limit, distance = self.distance_to_goal(), "step limit reached");
                    break RunStatus::StepLimitReached;
                }
            }

            let record = self.step();
            if !record.outcome.is_moved() {
                warn!(step = record.step, x = record.position.x, y = record.position.y, "robot stalled");
            }
            observer(&record);
            trajectory.push(record);
        };

        let report = RunReport {
            status,
            steps: trajectory.len(),
            stalls: trajectory.stalls(),
            final_position: self.robot.position(),
            final_distance: self.distance_to_goal(),
            trajectory,
        };
        info!(
            status = ?report.status,
            steps = report.steps,
            stalls = report.stalls,
            distance = report.final_distance,
            "simulation finished"
        );
        report
    }
}
