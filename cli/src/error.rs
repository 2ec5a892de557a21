//! CLI error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] sprout_engine::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("strategies disagree with {reference}: {mismatches}")]
    Inconsistent {
        reference: &'static str,
        mismatches: String,
    },
}

pub type CliResult<T> = Result<T, CliError>;
