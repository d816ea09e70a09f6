//! Ring of candidate positions sampled around the robot.
//!
//! Angles are `k * step_degree` for k = 1..=num_points, so the ring skips 0°
//! and ends on 360° (which coincides with 0°).

use serde::Serialize;

use crate::error::{ApfError, Result};
use crate::geometry::Position;

/// One sampled point on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingPoint {
    pub angle_degrees: f64,
    pub position: Position,
}

/// Sampling geometry: radius and angular resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRing {
    radius: f64,
    num_points: usize,
    step_degree: f64,
}

impl CandidateRing {
    pub fn new(radius: f64, num_points: usize) -> Result<Self> {
        if num_points < 1 {
            return Err(ApfError::InvalidPointCount { num_points });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ApfError::InvalidSensorRange { sensor_range: radius });
        }
        Ok(Self { radius, num_points, step_degree: 360.0 / num_points as f64 })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn step_degree(&self) -> f64 {
        self.step_degree
    }

    /// Angle of the zero-based candidate `index`, i.e. `(index + 1) * step_degree`.
    #[inline]
    pub fn angle_for(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.step_degree
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.num_points).map(move |i| self.angle_for(i))
    }

    /// Sample the full ring around `origin`. Always `num_points` long.
    pub fn sample(&self, origin: &Position) -> Vec<RingPoint> {
        self.angles()
            .map(|angle_degrees| RingPoint {
                angle_degrees,
                position: origin.offset_polar(self.radius, angle_degrees),
            })
            .collect()
    }
}
