use std::fmt::Display;

/// Error raised by the fire risk computation and its I/O.
///
/// `Precondition` is kept apart from `Computation` so that service code can
/// tell "nothing to compute" from "the computation went wrong".
#[derive(Debug)]
pub enum FRCMError {
    /// malformed CSV row, timestamp, number or missing mandatory field
    Parse(String),
    /// input rejected before any simulation step ran
    Precondition(String),
    /// invalid simulation parameters
    Configuration(String),
    /// non-finite value reached the simulation
    Computation(String),
    Io(std::io::Error),
}

impl FRCMError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, FRCMError::Precondition(_))
    }

    pub fn is_computation(&self) -> bool {
        matches!(self, FRCMError::Computation(_))
    }
}

impl From<String> for FRCMError {
    fn from(msg: String) -> Self {
        FRCMError::Computation(msg)
    }
}

impl From<&str> for FRCMError {
    fn from(msg: &str) -> Self {
        FRCMError::Computation(msg.into())
    }
}

impl From<std::io::Error> for FRCMError {
    fn from(err: std::io::Error) -> Self {
        FRCMError::Io(err)
    }
}

impl Display for FRCMError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FRCMError::Parse(msg) => write!(f, "parse error: {}", msg),
            FRCMError::Precondition(msg) => write!(f, "precondition failed: {}", msg),
            FRCMError::Configuration(msg) => write!(f, "invalid configuration: {}", msg),
            FRCMError::Computation(msg) => write!(f, "computation failed: {}", msg),
            FRCMError::Io(err) => write!(f, "i/o error: {}", err),
        }
    }
}

impl std::error::Error for FRCMError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FRCMError::Io(err) => Some(err),
            _ => None,
        }
    }
}
