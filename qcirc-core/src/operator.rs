//! Operador linear denso
//!
//! Um [`Operator`] de `n` qubits é uma matriz complexa `2^n × 2^n` em ordem
//! row-major. Linhas e colunas usam a mesma convenção de rótulos de
//! [`State`](crate::State).

use crate::algebra::{self, Shape};
use crate::config::MAX_OPERATOR_QUBITS;
use crate::error::{QuantumError, QuantumResult};
use crate::state::{dimension_for, State};
use crate::Amplitude;
use serde::{Deserialize, Serialize};

/// Operador sobre `n` qubits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOperator")]
pub struct Operator {
    qubits: usize,
    dim: usize,
    entries: Vec<Amplitude>,
}

#[derive(Deserialize)]
struct RawOperator {
    qubits: usize,
    entries: Vec<Amplitude>,
}

impl TryFrom<RawOperator> for Operator {
    type Error = QuantumError;

    fn try_from(raw: RawOperator) -> Result<Self, Self::Error> {
        Operator::from_entries(raw.qubits, raw.entries)
    }
}

impl Operator {
    /// Aloca operador com todas as entradas nulas
    pub fn zeroed(qubits: usize) -> QuantumResult<Self> {
        let dim = dimension_for(qubits, MAX_OPERATOR_QUBITS)?;
        Ok(Self {
            qubits,
            dim,
            entries: vec![Amplitude::new(0.0, 0.0); dim * dim],
        })
    }

    /// Cria operador a partir de `4^qubits` entradas row-major
    pub fn from_entries(qubits: usize, entries: Vec<Amplitude>) -> QuantumResult<Self> {
        let dim = dimension_for(qubits, MAX_OPERATOR_QUBITS)?;
        if entries.len() != dim * dim {
            return Err(QuantumError::AmplitudeCount {
                expected: dim * dim,
                found: entries.len(),
            });
        }
        Ok(Self { qubits, dim, entries })
    }

    /// Cria operador avaliando `f(linha, coluna)` para cada entrada
    pub fn from_fn<F>(qubits: usize, mut f: F) -> QuantumResult<Self>
    where
        F: FnMut(usize, usize) -> Amplitude,
    {
        let dim = dimension_for(qubits, MAX_OPERATOR_QUBITS)?;
        let mut entries = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                entries.push(f(row, col));
            }
        }
        Ok(Self { qubits, dim, entries })
    }

    #[inline]
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Lado da matriz (`2^qubits`)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Entrada `(row, col)`
    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> Option<Amplitude> {
        if row < self.dim && col < self.dim {
            Some(self.entries[row * self.dim + col])
        } else {
            None
        }
    }

    /// Linha `row` como fatia
    pub fn row(&self, row: usize) -> Option<&[Amplitude]> {
        (row < self.dim).then(|| &self.entries[row * self.dim..(row + 1) * self.dim])
    }

    /// Entradas em ordem row-major
    #[inline]
    pub fn entries(&self) -> &[Amplitude] {
        &self.entries
    }

    /// Popula uma entrada
    pub fn set_entry(&mut self, row: usize, col: usize, value: Amplitude) -> QuantumResult<()> {
        let dimension = self.dim;
        for index in [row, col] {
            if index >= dimension {
                return Err(QuantumError::IndexOutOfRange { index, dimension });
            }
        }
        self.entries[row * dimension + col] = value;
        Ok(())
    }

    pub fn into_entries(self) -> Vec<Amplitude> {
        self.entries
    }

    /// Produto tensorial `self ⊗ other`; `self` ocupa os qubits de ordem alta
    pub fn tensor(&self, other: &Operator) -> QuantumResult<Operator> {
        let qubits = self.qubits + other.qubits;
        let dim = dimension_for(qubits, MAX_OPERATOR_QUBITS)?;

        let entries = algebra::kron(
            &self.entries,
            Shape::new(self.dim, self.dim),
            &other.entries,
            Shape::new(other.dim, other.dim),
        );
        tracing::debug!(left = self.qubits, right = other.qubits, "operator tensor");
        Ok(Self { qubits, dim, entries })
    }

    /// Aplica o operador a um estado: `self · state`
    pub fn apply(&self, state: &State) -> QuantumResult<State> {
        if self.qubits != state.qubits() {
            return Err(QuantumError::DimensionMismatch {
                expected: self.qubits,
                found: state.qubits(),
            });
        }
        let amplitudes = algebra::matvec(&self.entries, state.amplitudes(), self.dim);
        tracing::debug!(qubits = self.qubits, "operator application");
        Ok(State::from_parts(self.qubits, amplitudes))
    }

    /// Composição `self · other`: aplica `other` e depois `self`
    pub fn compose(&self, other: &Operator) -> QuantumResult<Operator> {
        if self.qubits != other.qubits {
            return Err(QuantumError::DimensionMismatch {
                expected: self.qubits,
                found: other.qubits,
            });
        }
        let entries = algebra::matmul(&self.entries, &other.entries, self.dim);
        tracing::debug!(qubits = self.qubits, "operator composition");
        Ok(Self {
            qubits: self.qubits,
            dim: self.dim,
            entries,
        })
    }

    /// Transposta conjugada (dagger)
    pub fn adjoint(&self) -> Operator {
        Self {
            qubits: self.qubits,
            dim: self.dim,
            entries: algebra::adjoint(&self.entries, self.dim),
        }
    }

    /// Verifica se `U · U†` é a identidade dentro da tolerância
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let product = algebra::matmul(&self.entries, &algebra::adjoint(&self.entries, self.dim), self.dim);
        product.iter().enumerate().all(|(i, z)| {
            let expected = if i / self.dim == i % self.dim { 1.0 } else { 0.0 };
            (z - Amplitude::new(expected, 0.0)).norm() <= tolerance
        })
    }

    /// Compara entradas com tolerância absoluta
    pub fn approx_eq(&self, other: &Operator, tolerance: f64) -> bool {
        self.qubits == other.qubits && algebra::approx_eq(&self.entries, &other.entries, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn identity(qubits: usize) -> Operator {
        Operator::from_fn(qubits, |r, c| Amplitude::new(if r == c { 1.0 } else { 0.0 }, 0.0)).unwrap()
    }

    fn hadamard() -> Operator {
        let h = FRAC_1_SQRT_2;
        Operator::from_entries(
            1,
            vec![
                Amplitude::new(h, 0.0),
                Amplitude::new(h, 0.0),
                Amplitude::new(h, 0.0),
                Amplitude::new(-h, 0.0),
            ],
        )
        .unwrap()
    }

    fn pauli_x() -> Operator {
        Operator::from_fn(1, |r, c| Amplitude::new(if r != c { 1.0 } else { 0.0 }, 0.0)).unwrap()
    }

    #[test]
    fn test_zeroed_operator() {
        let op = Operator::zeroed(2).unwrap();
        assert_eq!(op.dimension(), 4);
        assert_eq!(op.entries().len(), 16);
        assert!(op.entries().iter().all(|z| *z == Amplitude::new(0.0, 0.0)));
    }

    #[test]
    fn test_operator_ceiling() {
        assert!(matches!(
            Operator::zeroed(MAX_OPERATOR_QUBITS + 1),
            Err(QuantumError::InvalidDimension { .. })
        ));
        assert!(matches!(Operator::zeroed(0), Err(QuantumError::InvalidDimension { .. })));
    }

    #[test]
    fn test_from_entries_length_checked() {
        assert_eq!(
            Operator::from_entries(1, vec![Amplitude::new(0.0, 0.0); 3]),
            Err(QuantumError::AmplitudeCount { expected: 4, found: 3 })
        );
    }

    #[test]
    fn test_entry_accessors() {
        let mut op = Operator::zeroed(1).unwrap();
        op.set_entry(0, 1, Amplitude::new(2.0, -1.0)).unwrap();

        assert_eq!(op.entry(0, 1), Some(Amplitude::new(2.0, -1.0)));
        assert_eq!(op.entry(2, 0), None);
        assert_eq!(op.row(0).unwrap()[1], Amplitude::new(2.0, -1.0));
        assert!(op.row(2).is_none());
        assert!(matches!(
            op.set_entry(0, 5, Amplitude::new(1.0, 0.0)),
            Err(QuantumError::IndexOutOfRange { index: 5, .. })
        ));
    }

    #[test]
    fn test_apply_identity() {
        let state = State::from_bits(&[0, 1]).unwrap();
        let out = identity(2).apply(&state).unwrap();
        assert_eq!(out, state);
    }

    #[test]
    fn test_apply_mismatch_is_error() {
        let state = State::basis(1, 0).unwrap();
        assert_eq!(
            identity(2).apply(&state),
            Err(QuantumError::DimensionMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_compose_mismatch_is_error() {
        assert_eq!(
            identity(1).compose(&identity(2)),
            Err(QuantumError::DimensionMismatch { expected: 1, found: 2 })
        );
    }

    #[test]
    fn test_hadamard_self_inverse() {
        let hh = hadamard().compose(&hadamard()).unwrap();
        assert!(hh.approx_eq(&identity(1), 1e-12));
    }

    #[test]
    fn test_compose_is_apply_right_then_left() {
        // X · H aplicado a |0⟩ = X|+⟩ = |+⟩; H · X aplicado a |0⟩ = H|1⟩ = |−⟩
        let zero = State::basis(1, 0).unwrap();
        let xh = pauli_x().compose(&hadamard()).unwrap();
        let hx = hadamard().compose(&pauli_x()).unwrap();

        let a = xh.apply(&zero).unwrap();
        let b = pauli_x().apply(&hadamard().apply(&zero).unwrap()).unwrap();
        assert!(a.approx_eq(&b, 1e-12));

        let minus = hx.apply(&zero).unwrap();
        assert!((minus.amplitudes()[1].re + FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_tensor_identity_hadamard_locality() {
        let zero = State::basis(1, 0).unwrap();
        let one = State::basis(1, 1).unwrap();

        let ih = identity(1).tensor(&hadamard()).unwrap();
        let lhs = ih.apply(&zero.tensor(&one).unwrap()).unwrap();
        let rhs = zero.tensor(&hadamard().apply(&one).unwrap()).unwrap();

        assert!(lhs.approx_eq(&rhs, 1e-12));
    }

    #[test]
    fn test_tensor_order_matters() {
        let ih = identity(1).tensor(&hadamard()).unwrap();
        let hi = hadamard().tensor(&identity(1)).unwrap();
        assert!(!ih.approx_eq(&hi, 1e-6));
        assert_eq!(ih.qubits(), 2);
    }

    #[test]
    fn test_adjoint_and_unitarity() {
        let y = Operator::from_entries(
            1,
            vec![
                Amplitude::new(0.0, 0.0),
                Amplitude::new(0.0, -1.0),
                Amplitude::new(0.0, 1.0),
                Amplitude::new(0.0, 0.0),
            ],
        )
        .unwrap();
        assert!(y.adjoint().approx_eq(&y, 1e-12));
        assert!(y.is_unitary(1e-12));

        let mut not_unitary = identity(1);
        not_unitary.set_entry(0, 0, Amplitude::new(2.0, 0.0)).unwrap();
        assert!(!not_unitary.is_unitary(1e-9));
    }

    #[test]
    fn test_operands_not_mutated() {
        let h = hadamard();
        let before = h.clone();
        let _ = h.compose(&h).unwrap();
        let _ = h.tensor(&h).unwrap();
        assert_eq!(h, before);
    }
}
