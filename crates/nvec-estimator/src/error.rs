use nvec_base::LinalgError;
use nvec_prior::PriorError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum EstimatorError {
    InvalidPeriod,
    DimensionMismatch { expected: String, got: String },
    IllConditioned,
}

impl fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorError::InvalidPeriod => write!(f, "period must be at least 1"),
            EstimatorError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
            EstimatorError::IllConditioned => write!(f, "K matrix is numerically singular"),
        }
    }
}

impl std::error::Error for EstimatorError {}

impl From<LinalgError> for EstimatorError {
    fn from(e: LinalgError) -> Self {
        match e {
            LinalgError::IllConditioned => EstimatorError::IllConditioned,
            LinalgError::ShapeMismatch { expected, got } => {
                EstimatorError::DimensionMismatch { expected, got }
            }
        }
    }
}

impl From<PriorError> for EstimatorError {
    fn from(e: PriorError) -> Self {
        match e {
            PriorError::IllConditioned => EstimatorError::IllConditioned,
            other => EstimatorError::DimensionMismatch {
                expected: "valid prior".to_string(),
                got: other.to_string(),
            },
        }
    }
}
