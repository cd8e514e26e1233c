use nvec_base::LinalgError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum PriorError {
    IllConditioned,
    FormatError(String),
    Io(String),
}

impl fmt::Display for PriorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorError::IllConditioned => write!(f, "training covariance is numerically singular"),
            PriorError::FormatError(msg) => write!(f, "malformed prior: {msg}"),
            PriorError::Io(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl std::error::Error for PriorError {}

impl From<LinalgError> for PriorError {
    fn from(e: LinalgError) -> Self {
        match e {
            LinalgError::IllConditioned => PriorError::IllConditioned,
            other => PriorError::FormatError(other.to_string()),
        }
    }
}
