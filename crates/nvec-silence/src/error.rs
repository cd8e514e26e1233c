use std::fmt;

#[derive(Debug, PartialEq)]
pub enum SilenceError {
    PreconditionViolation { expected: usize, got: usize },
}

impl fmt::Display for SilenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SilenceError::PreconditionViolation { expected, got } => write!(
                f,
                "decoder reported {got} decoded frames but the frame table has {expected}"
            ),
        }
    }
}

impl std::error::Error for SilenceError {}
