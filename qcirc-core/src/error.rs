//! Tipos de erro para qcirc-core

use std::fmt;
use thiserror::Error;

/// Resultado customizado para operações quânticas
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros que podem ocorrer em operações quânticas
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("Dimension mismatch: expected {expected} qubits, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Invalid dimension: {qubits} qubits ({reason})")]
    InvalidDimension { qubits: usize, reason: &'static str },

    #[error("Invalid qubit index {index} for a {qubits}-qubit state")]
    InvalidQubitIndex { index: usize, qubits: usize },

    #[error("Unnormalized state: squared magnitudes sum to {norm_sqr}")]
    UnnormalizedState { norm_sqr: f64 },

    #[error("Cannot normalize a zero vector")]
    ZeroNorm,

    #[error("Amplitude count mismatch: expected {expected}, got {found}")]
    AmplitudeCount { expected: usize, found: usize },

    #[error("Index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },

    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Diagnóstico não-fatal: estado consumido sem norma unitária.
///
/// Fidelidade e medição continuam com o estado tal como está; o engine
/// emite este aviso via `tracing` ou o converte em erro no modo estrito.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnnormalizedState {
    /// Soma dos módulos ao quadrado observada
    pub norm_sqr: f64,
    /// Tolerância usada na verificação
    pub tolerance: f64,
}

impl UnnormalizedState {
    /// Desvio absoluto em relação a 1
    pub fn deviation(&self) -> f64 {
        (self.norm_sqr - 1.0).abs()
    }
}

impl fmt::Display for UnnormalizedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "state is not normalized: sum of |a|^2 = {} (tolerance {})",
            self.norm_sqr, self.tolerance
        )
    }
}

impl From<UnnormalizedState> for QuantumError {
    fn from(warning: UnnormalizedState) -> Self {
        QuantumError::UnnormalizedState {
            norm_sqr: warning.norm_sqr,
        }
    }
}
