use std::fmt;

#[derive(Debug, PartialEq)]
pub enum LinalgError {
    ShapeMismatch { expected: String, got: String },
    IllConditioned,
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            LinalgError::IllConditioned => write!(f, "matrix is numerically singular"),
        }
    }
}

impl std::error::Error for LinalgError {}
