pub mod archive;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod vector;

pub use archive::ArchiveError;
pub use error::LinalgError;
pub use logging::{init_stdout_logger, FileLogger, StdoutLogger};
pub use matrix::Matrix;
pub use vector::Vector;

// Re-export log crate so downstream crates share a single facade version.
pub use log;
