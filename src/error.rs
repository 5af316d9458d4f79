use crate::pattern::{MatchError, PatternError};

/// Any failure of a one-shot [`crate::matches`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern was rejected before any matching began.
    InvalidPattern(PatternError),
    /// The search ran out of budget before it could decide.
    ResourceExhausted(MatchError),
}

impl Error {
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Error::InvalidPattern(_))
    }

    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Error::ResourceExhausted(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPattern(err) => write!(f, "Invalid pattern: {err}"),
            Self::ResourceExhausted(err) => write!(f, "Resource exhausted: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern(err) => Some(err),
            Self::ResourceExhausted(err) => Some(err),
        }
    }
}

impl From<PatternError> for Error {
    fn from(err: PatternError) -> Self {
        Error::InvalidPattern(err)
    }
}

impl From<MatchError> for Error {
    fn from(err: MatchError) -> Self {
        Error::ResourceExhausted(err)
    }
}
