//! Tipos de erro para qcirc-gates

use qcirc_core::QuantumError;
use thiserror::Error;

/// Resultado customizado para o catálogo de portas
pub type GateResult<T> = Result<T, GateError>;

/// Erros que podem ocorrer ao construir portas
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GateError {
    #[error("Core quantum error: {0}")]
    Core(#[from] QuantumError),

    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    #[error("Gate {0} requires a parameter")]
    MissingParameter(&'static str),
}
