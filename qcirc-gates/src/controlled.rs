//! Portas multi-qubit: controladas, permutações de qubits e Toffoli

use qcirc_core::{bit_at, Operator, MAX_OPERATOR_QUBITS};
use std::collections::HashSet;

use crate::error::{GateError, GateResult};
use crate::gates::{c, PauliX, PauliY, PauliZ, PhaseTurn, QuantumGate, TGate};

/// Porta controlada pelo qubit 0: `diag(I, U)`
///
/// A porta interna atua nos qubits `1..=n`.
#[derive(Clone, Copy, Debug)]
pub struct Controlled<G> {
    gate: G,
    label: &'static str,
}

impl<G: QuantumGate> Controlled<G> {
    pub fn new(gate: G, label: &'static str) -> Self {
        Self { gate, label }
    }

    pub fn inner(&self) -> &G {
        &self.gate
    }
}

impl<G: QuantumGate> QuantumGate for Controlled<G> {
    fn name(&self) -> &'static str {
        self.label
    }

    fn qubits(&self) -> usize {
        self.gate.qubits() + 1
    }

    fn operator(&self) -> GateResult<Operator> {
        let inner = self.gate.operator()?;
        let half = inner.dimension();

        Ok(Operator::from_fn(self.qubits(), |r, col| match (r < half, col < half) {
            (true, true) if r == col => c(1.0, 0.0),
            (false, false) => inner.entry(r - half, col - half).unwrap_or_default(),
            _ => c(0.0, 0.0),
        })?)
    }
}

/// CNOT
pub fn cx() -> Controlled<PauliX> {
    Controlled::new(PauliX, "CX")
}

pub fn cy() -> Controlled<PauliY> {
    Controlled::new(PauliY, "CY")
}

pub fn cz() -> Controlled<PauliZ> {
    Controlled::new(PauliZ, "CZ")
}

pub fn ct() -> Controlled<TGate> {
    Controlled::new(TGate, "CT")
}

/// Fase controlada de `turns` voltas
pub fn crot_z(turns: f64) -> Controlled<PhaseTurn> {
    Controlled::new(PhaseTurn::new(turns), "CR")
}

/// Permutação de qubits.
///
/// O qubit `j` da entrada vai para o qubit `map[j]` da saída: a linha `i`
/// tem seu 1 na coluna cujo bit `j` é o bit `map[j]` de `i`. Com
/// `[2, 0, 1]`, `|100⟩` vira `|001⟩`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    map: Vec<usize>,
}

impl Permutation {
    pub fn new(map: Vec<usize>) -> GateResult<Self> {
        if map.is_empty() {
            return Err(GateError::InvalidPermutation("empty map".into()));
        }
        let n = map.len();
        if n > MAX_OPERATOR_QUBITS {
            return Err(GateError::InvalidPermutation(format!(
                "{n} qubits exceeds the operator ceiling of {MAX_OPERATOR_QUBITS}"
            )));
        }
        let mut seen = HashSet::with_capacity(n);
        for &target in &map {
            if target >= n {
                return Err(GateError::InvalidPermutation(format!(
                    "qubit {target} out of range for {n} qubits"
                )));
            }
            if !seen.insert(target) {
                return Err(GateError::InvalidPermutation(format!(
                    "qubit {target} appears more than once"
                )));
            }
        }
        Ok(Self { map })
    }

    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Índice de entrada levado a `index` (a coluna não nula da linha `index`)
    pub fn source(&self, index: usize) -> usize {
        let n = self.map.len();
        self.map
            .iter()
            .fold(0, |acc, &source| (acc << 1) | bit_at(index, source, n) as usize)
    }
}

impl QuantumGate for Permutation {
    fn name(&self) -> &'static str {
        "SWAP"
    }

    fn qubits(&self) -> usize {
        self.map.len()
    }

    fn operator(&self) -> GateResult<Operator> {
        Ok(Operator::from_fn(self.qubits(), |r, col| {
            if self.source(r) == col { c(1.0, 0.0) } else { c(0.0, 0.0) }
        })?)
    }
}

/// Toffoli: troca `|011⟩` e `|111⟩`
///
/// Alvo no qubit 0, controles nos qubits 1 e 2.
#[derive(Clone, Copy, Debug, Default)]
pub struct Toffoli;

impl Toffoli {
    pub const QUBITS: usize = 3;
}

impl QuantumGate for Toffoli {
    fn name(&self) -> &'static str {
        "CCX"
    }

    fn qubits(&self) -> usize {
        Self::QUBITS
    }

    fn operator(&self) -> GateResult<Operator> {
        Ok(Operator::from_fn(Self::QUBITS, |r, col| {
            let target = match r {
                0b011 => 0b111,
                0b111 => 0b011,
                other => other,
            };
            if col == target { c(1.0, 0.0) } else { c(0.0, 0.0) }
        })?)
    }
}
