//! Planar geometry primitives.

use serde::{Deserialize, Serialize};

use crate::error::{ApfError, Result};

/// Point in the planning plane (x, y), arbitrary distance units.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Like [`Position::new`], rejecting NaN and infinite coordinates.
    pub fn checked(x: f64, y: f64) -> Result<Self> {
        let pos = Self { x, y };
        pos.validate()?;
        Ok(pos)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(ApfError::NonFinitePosition { x: self.x, y: self.y })
        }
    }

    /// Calculate distance between two positions
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at `radius` from `self` along `angle_degrees` (counter-clockwise from +x).
    pub fn offset_polar(&self, radius: f64, angle_degrees: f64) -> Position {
        let theta = angle_degrees.to_radians();
        Position { x: self.x + radius * theta.cos(), y: self.y + radius * theta.sin() }
    }

    /// Heading from `self` toward `other`, in degrees within (-180, 180].
    pub fn bearing_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x).to_degrees()
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}
