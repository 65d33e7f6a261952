//! Estados de um qubit pré-definidos

use qcirc_core::{Amplitude, State};
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, TAU};

use crate::error::GateResult;

fn qubit(a: Amplitude, b: Amplitude) -> GateResult<State> {
    Ok(State::from_amplitudes(1, vec![a, b])?)
}

/// |0⟩
pub fn zero() -> GateResult<State> {
    Ok(State::basis(1, 0)?)
}

/// |1⟩
pub fn one() -> GateResult<State> {
    Ok(State::basis(1, 1)?)
}

/// |+⟩ = (|0⟩ + |1⟩)/√2
pub fn plus() -> GateResult<State> {
    let h = Amplitude::new(FRAC_1_SQRT_2, 0.0);
    qubit(h, h)
}

/// |−⟩ = (|0⟩ − |1⟩)/√2
pub fn minus() -> GateResult<State> {
    let h = Amplitude::new(FRAC_1_SQRT_2, 0.0);
    qubit(h, -h)
}

/// Qubit aleatório normalizado.
///
/// Fase global `r1` e ângulo de mistura `r2`, ambos uniformes em `[0, 2π)`.
pub fn random<R: Rng + ?Sized>(rng: &mut R) -> GateResult<State> {
    let r1 = rng.gen_range(0.0..TAU);
    let r2 = rng.gen_range(0.0..TAU);
    let phase = Amplitude::from_polar(1.0, r1);
    qubit(phase * r2.cos(), phase * r2.sin())
}
