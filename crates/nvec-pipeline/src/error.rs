use nvec_estimator::EstimatorError;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// A config option was enabled without the stage it depends on (e.g.
    /// `cmvn_config` set without `global_cmvn_stats`).
    UnmetDependency(String),
    DimensionMismatch { expected: String, got: String },
    /// A frame at or beyond `num_frames_ready()` was requested.
    PreconditionViolation { requested: usize, ready: usize },
    Estimator(EstimatorError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::UnmetDependency(msg) => write!(f, "unmet pipeline dependency: {msg}"),
            PipelineError::DimensionMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected}, got {got}")
            }
            PipelineError::PreconditionViolation { requested, ready } => write!(
                f,
                "requested frame {requested} but only {ready} frames are ready"
            ),
            PipelineError::Estimator(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<EstimatorError> for PipelineError {
    fn from(e: EstimatorError) -> Self {
        PipelineError::Estimator(e)
    }
}
