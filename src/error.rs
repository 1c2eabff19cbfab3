use std::fmt;

/// Errors surfaced by configuration validation and the per-frame update.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter (or a value derived from one) is outside its valid range.
    /// Raised before any layout or simulation work begins.
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },
    /// A negative frame index was passed to the simulation step.
    InvalidFrame { frame: i64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration { parameter, reason } => {
                write!(f, "invalid configuration: {parameter}: {reason}")
            }
            Error::InvalidFrame { frame } => {
                write!(f, "invalid frame index: {frame}")
            }
        }
    }
}

impl std::error::Error for Error {}
