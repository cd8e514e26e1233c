pub mod error;
pub mod estimator;

pub use error::EstimatorError;
pub use estimator::{AdaptationState, Estimator};
