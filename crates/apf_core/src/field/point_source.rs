//! Gaussian point source shared by goals and obstacles.
//!
//! Whether a source attracts or repels is decided by the potential function
//! applied to it, not by its type.

use serde::Serialize;
use std::f64::consts::PI;

use crate::error::{ApfError, Result};
use crate::geometry::Position;

/// Immutable Gaussian source: center, width and derived depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSource {
    position: Position,
    sigma: f64,
    alpha: f64,
}

impl PointSource {
    /// Create a source. `sigma` must be finite and strictly positive.
    pub fn new(position: Position, sigma: f64) -> Result<Self> {
        position.validate()?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ApfError::InvalidSigma { sigma });
        }
        let alpha = 1.0 / (sigma * (2.0 * PI).sqrt());
        Ok(Self { position, sigma, alpha })
    }

    pub fn at(x: f64, y: f64, sigma: f64) -> Result<Self> {
        Self::new(Position::new(x, y), sigma)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Width of the Gaussian.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Depth of the Gaussian, `1 / (sigma * sqrt(2 pi))`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `exp(-0.5 * (d / sigma)^2)` for the distance `d` from `point` to the center.
    #[inline]
    pub(crate) fn gaussian_at(&self, point: &Position) -> f64 {
        let normalized = point.distance_to(&self.position) / self.sigma;
        (-0.5 * normalized * normalized).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_derivation() {
        for sigma in [0.25, 1.0, 2.0, 4.0, 17.5] {
            let src = PointSource::at(0.0, 0.0, sigma).unwrap();
            let expected = 1.0 / (sigma * (2.0 * PI).sqrt());
            assert!((src.alpha() - expected).abs() < 1e-15, "sigma={}", sigma);
            assert_eq!(src.sigma(), sigma);
        }
    }

    #[test]
    fn test_rejects_bad_sigma() {
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = PointSource::at(1.0, 1.0, sigma).unwrap_err();
            assert!(matches!(err, ApfError::InvalidSigma { .. }), "sigma={}", sigma);
        }
    }

    #[test]
    fn test_rejects_non_finite_center() {
        let err = PointSource::at(f64::NAN, 1.0, 1.0).unwrap_err();
        assert!(matches!(err, ApfError::NonFinitePosition { .. }));
    }

    #[test]
    fn test_gaussian_peak_and_decay() {
        let src = PointSource::at(3.0, 4.0, 2.0).unwrap();
        assert_eq!(src.gaussian_at(&Position::new(3.0, 4.0)), 1.0);

        // One sigma away: exp(-0.5)
        let one_sigma = src.gaussian_at(&Position::new(5.0, 4.0));
        assert!((one_sigma - (-0.5f64).exp()).abs() < 1e-12);

        let far = src.gaussian_at(&Position::new(30.0, 4.0));
        assert!(far < one_sigma);
    }
}
