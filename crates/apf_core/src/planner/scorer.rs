//! Candidate scoring against the robot's current position.
//!
//! Two metrics per candidate:
//! - `error_cost`: total potential relative to staying put (negative = improvement)
//! - `fitness`: reduction of distance to the goal (positive = closer)

use serde::Serialize;

use super::candidate_ring::RingPoint;
use crate::field::{attractive, repulsive, PointSource};
use crate::geometry::Position;

/// Values at the robot's current position that candidates are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceScore {
    /// Total potential at the current position (JT)
    pub total_cost: f64,
    /// Distance from the current position to the goal (DTG)
    pub distance_to_goal: f64,
}

impl ReferenceScore {
    pub fn at(position: &Position, goal: &PointSource, obstacles: &[PointSource]) -> Self {
        Self {
            total_cost: repulsive(position, obstacles) + attractive(position, goal),
            distance_to_goal: position.distance_to(&goal.position()),
        }
    }
}

/// Fully scored ring point. Rebuilt every planning step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Candidate {
    pub angle_degrees: f64,
    pub position: Position,
    pub cost_obstacles: f64,
    pub cost_goal: f64,
    pub cost_total: f64,
    pub distance_to_goal: f64,
    pub error_cost: f64,
    pub error_distance: f64,
    pub fitness: f64,
}

impl Candidate {
    /// Lowers total potential relative to the current position.
    #[inline]
    pub fn improves_cost(&self) -> bool {
        self.error_cost < 0.0
    }
}

/// Score one ring point.
pub fn score_point(
    point: &RingPoint,
    reference: &ReferenceScore,
    goal: &PointSource,
    obstacles: &[PointSource],
) -> Candidate {
    let cost_obstacles = repulsive(&point.position, obstacles);
    let cost_goal = attractive(&point.position, goal);
    let cost_total = cost_obstacles + cost_goal;
    let distance_to_goal = point.position.distance_to(&goal.position());
    let error_distance = distance_to_goal - reference.distance_to_goal;

    Candidate {
        angle_degrees: point.angle_degrees,
        position: point.position,
        cost_obstacles,
        cost_goal,
        cost_total,
        distance_to_goal,
        error_cost: cost_total - reference.total_cost,
        error_distance,
        fitness: -error_distance,
    }
}

/// Score every ring point around `origin`, preserving ring order.
pub fn score_ring(
    origin: &Position,
    ring: &[RingPoint],
    goal: &PointSource,
    obstacles: &[PointSource],
) -> (ReferenceScore, Vec<Candidate>) {
    let reference = ReferenceScore::at(origin, goal, obstacles);
    let candidates =
        ring.iter().map(|point| score_point(point, &reference, goal, obstacles)).collect();
    (reference, candidates)
}
