use std::fmt;

#[derive(Debug, PartialEq)]
pub enum OfflineError {
    EmptyInput,
    DimensionMismatch { expected: String, got: String },
}

impl fmt::Display for OfflineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OfflineError::EmptyInput => write!(f, "feature matrix has zero rows"),
            OfflineError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
        }
    }
}

impl std::error::Error for OfflineError {}
