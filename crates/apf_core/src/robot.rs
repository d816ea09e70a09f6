//! Robot: owns the planner state and its own position.
//!
//! Per step the driver calls [`Robot::decide_next_move`] then
//! [`Robot::take_next_move`]. The first rebuilds every candidate from
//! scratch; the second runs the selector and moves the robot only when some
//! candidate lowers the total potential.

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{ApfError, Result};
use crate::field::{total, PointSource};
use crate::geometry::Position;
use crate::planner::{score_ring, select, Candidate, CandidateRing, ReferenceScore, Selection};

/// Fraction of the sensor range covered by one step.
pub const STEP_FRACTION: f64 = 0.4;

/// Outcome of [`Robot::take_next_move`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Committed to a candidate
    Moved { position: Position, candidate_index: usize },
    /// No candidate lowers the total potential; position unchanged
    NoImprovingCandidate,
}

impl MoveOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved { .. })
    }

    pub fn candidate_index(&self) -> Option<usize> {
        match self {
            MoveOutcome::Moved { candidate_index, .. } => Some(*candidate_index),
            MoveOutcome::NoImprovingCandidate => None,
        }
    }
}

/// Where the robot is within one planning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPhase {
    Idle,
    Evaluated,
    Committed,
    Stalled,
}

#[derive(Debug, Clone)]
pub struct Robot {
    position: Position,
    sensor_range: f64,
    ring: CandidateRing,
    candidates: Vec<Candidate>,
    reference: Option<ReferenceScore>,
    phase: PlanPhase,
}

impl Robot {
    /// Create a robot. Fails on a non-finite start, `sensor_range <= 0` or `num_points < 1`.
    pub fn new(position: Position, sensor_range: f64, num_points: usize) -> Result<Self> {
        position.validate()?;
        if !sensor_range.is_finite() || sensor_range <= 0.0 {
            return Err(ApfError::InvalidSensorRange { sensor_range });
        }
        let ring = CandidateRing::new(STEP_FRACTION * sensor_range, num_points)?;
        Ok(Self {
            position,
            sensor_range,
            candidates: vec![Candidate::default(); num_points],
            ring,
            reference: None,
            phase: PlanPhase::Idle,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn sensor_range(&self) -> f64 {
        self.sensor_range
    }

    pub fn step_size(&self) -> f64 {
        self.ring.radius()
    }

    pub fn num_points(&self) -> usize {
        self.ring.num_points()
    }

    pub fn step_degree(&self) -> f64 {
        self.ring.step_degree()
    }

    pub fn phase(&self) -> PlanPhase {
        self.phase
    }

    /// Candidates from the last evaluation (zeroed before the first one).
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Reference values from the last evaluation.
    pub fn reference(&self) -> Option<&ReferenceScore> {
        self.reference.as_ref()
    }

    pub fn distance_to(&self, source: &PointSource) -> f64 {
        self.position.distance_to(&source.position())
    }

    /// Total potential at an arbitrary point.
    pub fn cost_at(&self, point: &Position, goal: &PointSource, obstacles: &[PointSource]) -> f64 {
        total(point, goal, obstacles)
    }

    /// Total potential at the robot's current position.
    pub fn current_cost(&self, goal: &PointSource, obstacles: &[PointSource]) -> f64 {
        total(&self.position, goal, obstacles)
    }

    /// Resample the ring around the current position and score every candidate.
    pub fn decide_next_move(&mut self, goal: &PointSource, obstacles: &[PointSource]) {
        let ring = self.ring.sample(&self.position);
        let (reference, candidates) = score_ring(&self.position, &ring, goal, obstacles);
        trace!(
            x = self.position.x,
            y = self.position.y,
            total_cost = reference.total_cost,
            distance_to_goal = reference.distance_to_goal,
            "scored candidate ring"
        );
        self.candidates = candidates;
        self.reference = Some(reference);
        self.phase = PlanPhase::Evaluated;
    }

    /// Run the selector and move to the committed candidate, if any.
    pub fn take_next_move(&mut self) -> MoveOutcome {
        let Selection { committed, commits, vetoes } = select(&self.candidates);

        match committed {
            Some(index) => {
                let candidate = self.candidates[index];
                self.position = candidate.position;
                self.phase = PlanPhase::Committed;
                debug!(
                    index,
                    angle = candidate.angle_degrees,
                    x = self.position.x,
                    y = self.position.y,
                    commits,
                    vetoes,
                    "solution exists"
                );
                MoveOutcome::Moved { position: self.position, candidate_index: index }
            }
            None => {
                self.phase = PlanPhase::Stalled;
                debug!(x = self.position.x, y = self.position.y, vetoes, "no solution exists");
                MoveOutcome::NoImprovingCandidate
            }
        }
    }

    /// `decide_next_move` followed by `take_next_move`.
    pub fn step(&mut self, goal: &PointSource, obstacles: &[PointSource]) -> MoveOutcome {
        self.decide_next_move(goal, obstacles);
        self.take_next_move()
    }
}
