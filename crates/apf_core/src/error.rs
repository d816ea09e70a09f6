use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApfError {
    #[error("Invalid sigma: {sigma} (must be finite and > 0)")]
    InvalidSigma { sigma: f64 },

    #[error("Invalid sensor range: {sensor_range} (must be finite and > 0)")]
    InvalidSensorRange { sensor_range: f64 },

    #[error("Invalid candidate count: {num_points} (must be >= 1)")]
    InvalidPointCount { num_points: usize },

    #[error("Non-finite position: ({x}, {y})")]
    NonFinitePosition { x: f64, y: f64 },

    #[error("Invalid goal threshold: {threshold} (must be finite and >= 0)")]
    InvalidThreshold { threshold: f64 },

    #[error("Unsupported scenario format: {path}")]
    UnsupportedFormat { path: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ApfError {
    /// Faults raised while validating a scenario, before any planning happens.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ApfError::InvalidSigma { .. }
                | ApfError::InvalidSensorRange { .. }
                | ApfError::InvalidPointCount { .. }
                | ApfError::NonFinitePosition { .. }
                | ApfError::InvalidThreshold { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ApfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ApfError::InvalidSigma { sigma: 0.0 }.is_configuration());
        assert!(ApfError::InvalidPointCount { num_points: 0 }.is_configuration());
        assert!(!ApfError::UnsupportedFormat { path: "a.txt".into() }.is_configuration());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(!ApfError::from(io).is_configuration());
    }

    #[test]
    fn test_display_messages() {
        let err = ApfError::InvalidSensorRange { sensor_range: -1.0 };
        assert_eq!(err.to_string(), "Invalid sensor range: -1 (must be finite and > 0)");
    }
}
