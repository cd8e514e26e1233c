pub mod error;
pub mod io;
pub mod prior;

pub use error::PriorError;
pub use io::{read_binary, read_text, write_binary, write_text};
pub use prior::{estimate_prior, Prior};
