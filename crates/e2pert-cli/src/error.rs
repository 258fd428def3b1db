use e2pert::core::io::table::TableError;
use e2pert::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write results to '{path}': {source}", path = path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// A follow-up suggestion printed after the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Core(EngineError::DegenerateEnergy { .. }) => Some(
                "Rerun with --skip-degenerate (or set analysis.degeneracy = \"skip\") to drop such pairs.",
            ),
            _ => None,
        }
    }
}
