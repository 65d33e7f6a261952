//! # Quantum Gates — Portas Quânticas para qcirc
//!
//! Portas padrão como fábricas de [`Operator`].
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: I, H (Hadamard), X, Y, Z (Pauli), S, T, T†, V (√X), V†, G, G†
//! - **Rotation**: Rx, Ry, Rz, fase em voltas (`PhaseTurn`)
//! - **Multi-qubit**: ver [`crate::controlled`]

use qcirc_core::{Amplitude, Operator, QuantumError, State};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI, TAU};

use crate::error::GateResult;

/// Tolerância usada por [`QuantumGate::is_unitary`]
pub const UNITARY_TOLERANCE: f64 = 1e-10;

#[inline]
pub(crate) fn c(re: f64, im: f64) -> Amplitude {
    Amplitude::new(re, im)
}

/// Exponencial complexa: e^(i*theta)
#[inline]
pub(crate) fn e_i(theta: f64) -> Amplitude {
    Amplitude::from_polar(1.0, theta)
}

/// Operador single-qubit `[[a, b], [c, d]]`
pub(crate) fn matrix2(a: Amplitude, b: Amplitude, c: Amplitude, d: Amplitude) -> GateResult<Operator> {
    Ok(Operator::from_entries(1, vec![a, b, c, d])?)
}

/// Trait para portas quânticas
pub trait QuantumGate: Send + Sync {
    /// Nome da porta
    fn name(&self) -> &'static str;

    /// Número de qubits em que atua
    fn qubits(&self) -> usize {
        1
    }

    /// Matriz da porta
    fn operator(&self) -> GateResult<Operator>;

    /// Verifica se é unitária
    fn is_unitary(&self) -> bool {
        self.operator()
            .map(|op| op.is_unitary(UNITARY_TOLERANCE))
            .unwrap_or(false)
    }

    /// Aplica a um estado
    fn apply(&self, state: &State) -> GateResult<State> {
        Ok(self.operator()?.apply(state)?)
    }
}

/// Embute `gate` num registrador de `qubits` qubits a partir do qubit `first`,
/// completando com identidades: `I ⊗ U ⊗ I`
pub fn lift(gate: &dyn QuantumGate, first: usize, qubits: usize) -> GateResult<Operator> {
    let last = first + gate.qubits();
    if last > qubits {
        return Err(QuantumError::InvalidQubitIndex {
            index: last - 1,
            qubits,
        }
        .into());
    }

    let mut op = gate.operator()?;
    if first > 0 {
        op = Identity::new(first).operator()?.tensor(&op)?;
    }
    if last < qubits {
        op = op.tensor(&Identity::new(qubits - last).operator()?)?;
    }
    Ok(op)
}

// =============================================================================
// Portas Padrão
// =============================================================================

/// Identidade sobre `qubits` qubits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub qubits: usize,
}

impl Identity {
    pub fn new(qubits: usize) -> Self {
        Self { qubits }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new(1)
    }
}

impl QuantumGate for Identity {
    fn name(&self) -> &'static str {
        "I"
    }

    fn qubits(&self) -> usize {
        self.qubits
    }

    fn operator(&self) -> GateResult<Operator> {
        Ok(Operator::from_fn(self.qubits, |r, col| {
            if r == col { c(1.0, 0.0) } else { c(0.0, 0.0) }
        })?)
    }
}

/// Porta Hadamard: cria superposição
#[derive(Clone, Copy, Debug, Default)]
pub struct Hadamard;

impl QuantumGate for Hadamard {
    fn name(&self) -> &'static str {
        "H"
    }

    fn operator(&self) -> GateResult<Operator> {
        let h = FRAC_1_SQRT_2;
        matrix2(c(h, 0.0), c(h, 0.0), c(h, 0.0), c(-h, 0.0))
    }
}

/// Porta Pauli-X (NOT quântico)
#[derive(Clone, Copy, Debug, Default)]
pub struct PauliX;

impl QuantumGate for PauliX {
    fn name(&self) -> &'static str {
        "X"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0))
    }
}

/// Porta Pauli-Y
#[derive(Clone, Copy, Debug, Default)]
pub struct PauliY;

impl QuantumGate for PauliY {
    fn name(&self) -> &'static str {
        "Y"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0))
    }
}

/// Porta Pauli-Z (phase flip)
#[derive(Clone, Copy, Debug, Default)]
pub struct PauliZ;

impl QuantumGate for PauliZ {
    fn name(&self) -> &'static str {
        "Z"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0))
    }
}

/// Porta S (√Z)
#[derive(Clone, Copy, Debug, Default)]
pub struct SGate;

impl QuantumGate for SGate {
    fn name(&self) -> &'static str {
        "S"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0))
    }
}

/// Porta T (π/8)
#[derive(Clone, Copy, Debug, Default)]
pub struct TGate;

impl QuantumGate for TGate {
    fn name(&self) -> &'static str {
        "T"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(FRAC_1_SQRT_2, FRAC_1_SQRT_2))
    }
}

/// Adjunta de T
#[derive(Clone, Copy, Debug, Default)]
pub struct TDagger;

impl QuantumGate for TDagger {
    fn name(&self) -> &'static str {
        "T†"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(FRAC_1_SQRT_2, -FRAC_1_SQRT_2))
    }
}

/// Porta V (√X)
#[derive(Clone, Copy, Debug, Default)]
pub struct VGate;

impl QuantumGate for VGate {
    fn name(&self) -> &'static str {
        "V"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(0.5, 0.5), c(0.5, -0.5), c(0.5, -0.5), c(0.5, 0.5))
    }
}

/// Adjunta de V
#[derive(Clone, Copy, Debug, Default)]
pub struct VDagger;

impl QuantumGate for VDagger {
    fn name(&self) -> &'static str {
        "V†"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(0.5, -0.5), c(0.5, 0.5), c(0.5, 0.5), c(0.5, -0.5))
    }
}

/// Porta G: rotação real por π/8 (igual a Ry(π/4))
#[derive(Clone, Copy, Debug, Default)]
pub struct GGate;

impl QuantumGate for GGate {
    fn name(&self) -> &'static str {
        "G"
    }

    fn operator(&self) -> GateResult<Operator> {
        let (cos, sin) = ((PI / 8.0).cos(), (PI / 8.0).sin());
        matrix2(c(cos, 0.0), c(-sin, 0.0), c(sin, 0.0), c(cos, 0.0))
    }
}

/// Adjunta de G
#[derive(Clone, Copy, Debug, Default)]
pub struct GDagger;

impl QuantumGate for GDagger {
    fn name(&self) -> &'static str {
        "G†"
    }

    fn operator(&self) -> GateResult<Operator> {
        let (cos, sin) = ((PI / 8.0).cos(), (PI / 8.0).sin());
        matrix2(c(cos, 0.0), c(sin, 0.0), c(-sin, 0.0), c(cos, 0.0))
    }
}

/// Porta de rotação em X
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationX {
    pub theta: f64,
}

impl RotationX {
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }
}

impl QuantumGate for RotationX {
    fn name(&self) -> &'static str {
        "Rx"
    }

    fn operator(&self) -> GateResult<Operator> {
        let cos = (self.theta / 2.0).cos();
        let sin = (self.theta / 2.0).sin();
        matrix2(c(cos, 0.0), c(0.0, -sin), c(0.0, -sin), c(cos, 0.0))
    }
}

/// Porta de rotação em Y
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationY {
    pub theta: f64,
}

impl RotationY {
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }
}

impl QuantumGate for RotationY {
    fn name(&self) -> &'static str {
        "Ry"
    }

    fn operator(&self) -> GateResult<Operator> {
        let cos = (self.theta / 2.0).cos();
        let sin = (self.theta / 2.0).sin();
        matrix2(c(cos, 0.0), c(-sin, 0.0), c(sin, 0.0), c(cos, 0.0))
    }
}

/// Porta de rotação em Z: `diag(e^{-iθ/2}, e^{iθ/2})`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationZ {
    pub theta: f64,
}

impl RotationZ {
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }
}

impl QuantumGate for RotationZ {
    fn name(&self) -> &'static str {
        "Rz"
    }

    fn operator(&self) -> GateResult<Operator> {
        let half = self.theta / 2.0;
        matrix2(e_i(-half), c(0.0, 0.0), c(0.0, 0.0), e_i(half))
    }
}

/// Fase medida em voltas: `diag(1, e^{i·2π·turns})`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTurn {
    pub turns: f64,
}

impl PhaseTurn {
    pub fn new(turns: f64) -> Self {
        Self { turns }
    }
}

impl QuantumGate for PhaseTurn {
    fn name(&self) -> &'static str {
        "R"
    }

    fn operator(&self) -> GateResult<Operator> {
        matrix2(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), e_i(self.turns * TAU))
    }
}

// =============================================================================
// Testes
// =============================================================================
