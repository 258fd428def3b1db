use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::matrices::ShapeError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid input shape: {0}")]
    InputShape(#[from] ShapeError),

    #[error("Transformation matrix '{name}' is singular and cannot be inverted")]
    SingularMatrix { name: &'static str },

    #[error(
        "Degenerate orbital energies for donor {donor} and acceptor {acceptor} (E = {energy} Eh); E2 is undefined"
    )]
    DegenerateEnergy {
        donor: String,
        acceptor: String,
        energy: f64,
    },

    #[error("Invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),
}
