//! Potential field evaluation.
//!
//! - Goal: negative Gaussian well, deepest (-alpha) at its center
//! - Obstacles: positive Gaussian bumps, summed
//!
//! All functions are pure; sources are only borrowed for the call.

use super::point_source::PointSource;
use crate::geometry::Position;

/// Repulsive potential at `point`, summed over `obstacles`. Never negative; 0 when empty.
pub fn repulsive<'a, I>(point: &Position, obstacles: I) -> f64
where
    I: IntoIterator<Item = &'a PointSource>,
{
    obstacles.into_iter().map(|obstacle| obstacle.alpha() * obstacle.gaussian_at(point)).sum()
}

/// Attractive potential of `goal` at `point`. Never positive.
pub fn attractive(point: &Position, goal: &PointSource) -> f64 {
    -goal.alpha() * goal.gaussian_at(point)
}

/// Combined potential; lower is better.
pub fn total<'a, I>(point: &Position, goal: &PointSource, obstacles: I) -> f64
where
    I: IntoIterator<Item = &'a PointSource>,
{
    attractive(point, goal) + repulsive(point, obstacles)
}
