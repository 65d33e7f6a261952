//! Fidelidade entre estados
//!
//! `fidelity(a, b) = |Σ_i a_i · conj(b_i)| = |⟨b|a⟩|`, simétrica em `a` e `b`.
//! Vale 1 exatamente quando os dois estados normalizados diferem só por uma
//! fase global.

use crate::error::{QuantumError, QuantumResult};
use crate::state::State;
use crate::Amplitude;

fn check_same_register(a: &State, b: &State) -> QuantumResult<()> {
    if a.qubits() != b.qubits() {
        return Err(QuantumError::DimensionMismatch {
            expected: a.qubits(),
            found: b.qubits(),
        });
    }
    Ok(())
}

/// Produto interno hermitiano `⟨b|a⟩`
pub fn inner_product(a: &State, b: &State) -> QuantumResult<Amplitude> {
    check_same_register(a, b)?;
    let b_conj = b.conjugate();
    Ok(a
        .amplitudes()
        .iter()
        .zip(b_conj.amplitudes())
        .map(|(&x, &y)| x * y)
        .sum())
}

/// Módulo do produto interno entre dois estados do mesmo registrador
pub fn fidelity(a: &State, b: &State) -> QuantumResult<f64> {
    Ok(inner_product(a, b)?.norm())
}

impl State {
    /// Atalho para [`fidelity`]
    pub fn fidelity(&self, other: &State) -> QuantumResult<f64> {
        fidelity(self, other)
    }
}
