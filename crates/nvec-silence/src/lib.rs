pub mod detector;
pub mod error;
pub mod traceback;

pub use detector::{FrameInfo, SilenceDetector};
pub use error::SilenceError;
pub use traceback::{TraceStep, TracebackSource};
