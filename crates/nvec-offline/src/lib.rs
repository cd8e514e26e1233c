pub mod error;
pub mod offline;

pub use error::OfflineError;
pub use offline::{classify_speech_rows, compute_offline_nvector};
