//! Error type shared by the builders and the benchmark harness

use thiserror::Error;

/// Errors raised by tree construction and benchmarking.
///
/// Every failure is detected before any node is allocated, so a caller that
/// sees an error never holds a partially built tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument is outside the domain the operation accepts
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

impl Error {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Name of the offending argument
    pub fn argument(&self) -> &'static str {
        match self {
            Error::InvalidArgument { argument, .. } => argument,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
