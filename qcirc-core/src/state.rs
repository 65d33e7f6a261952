//! Vetor de estado denso
//!
//! Um [`State`] de `n` qubits guarda `2^n` amplitudes complexas. O índice `i`
//! é o rótulo da base computacional: seus bits, lidos do mais significativo
//! para o menos significativo, correspondem aos qubits `0..n`.

use crate::algebra::{self, Shape};
use crate::config::{MAX_STATE_QUBITS, NormalizationMode};
use crate::error::{QuantumError, QuantumResult, UnnormalizedState};
use crate::Amplitude;
use serde::{Deserialize, Serialize};

/// Valida a contagem de qubits e devolve a dimensão `2^qubits`
pub(crate) fn dimension_for(qubits: usize, ceiling: usize) -> QuantumResult<usize> {
    if qubits == 0 {
        return Err(QuantumError::InvalidDimension {
            qubits,
            reason: "at least one qubit is required",
        });
    }
    if qubits > ceiling {
        return Err(QuantumError::InvalidDimension {
            qubits,
            reason: "exceeds the dense simulation ceiling",
        });
    }
    Ok(1usize << qubits)
}

/// Valor (0 ou 1) do `qubit` no rótulo `index` de um registrador de `qubits`.
///
/// Qubits fora do registrador, ou além da largura de `usize`, valem 0.
#[inline]
pub fn bit_at(index: usize, qubit: usize, qubits: usize) -> u8 {
    if qubit >= qubits {
        return 0;
    }
    u32::try_from(qubits - 1 - qubit)
        .ok()
        .and_then(|shift| index.checked_shr(shift))
        .map_or(0, |shifted| (shifted & 1) as u8)
}

/// Estado puro de `n` qubits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawState")]
pub struct State {
    qubits: usize,
    amplitudes: Vec<Amplitude>,
}

#[derive(Deserialize)]
struct RawState {
    qubits: usize,
    amplitudes: Vec<Amplitude>,
}

impl TryFrom<RawState> for State {
    type Error = QuantumError;

    fn try_from(raw: RawState) -> Result<Self, Self::Error> {
        State::from_amplitudes(raw.qubits, raw.amplitudes)
    }
}

impl State {
    /// Aloca estado com todas as amplitudes nulas.
    ///
    /// Não é um estado quântico válido até ser populado.
    pub fn zeroed(qubits: usize) -> QuantumResult<Self> {
        let dim = dimension_for(qubits, MAX_STATE_QUBITS)?;
        Ok(Self {
            qubits,
            amplitudes: vec![Amplitude::new(0.0, 0.0); dim],
        })
    }

    /// Cria estado a partir de um buffer de `2^qubits` amplitudes
    pub fn from_amplitudes(qubits: usize, amplitudes: Vec<Amplitude>) -> QuantumResult<Self> {
        let dim = dimension_for(qubits, MAX_STATE_QUBITS)?;
        if amplitudes.len() != dim {
            return Err(QuantumError::AmplitudeCount {
                expected: dim,
                found: amplitudes.len(),
            });
        }
        Ok(Self { qubits, amplitudes })
    }

    /// Vetor da base computacional `|index⟩`
    pub fn basis(qubits: usize, index: usize) -> QuantumResult<Self> {
        let mut state = Self::zeroed(qubits)?;
        state.set_amplitude(index, Amplitude::new(1.0, 0.0))?;
        Ok(state)
    }

    /// Vetor da base a partir de bits, qubit 0 primeiro (`[0, 1]` = `|01⟩`)
    pub fn from_bits(bits: &[u8]) -> QuantumResult<Self> {
        let index = bits.iter().fold(0usize, |acc, &b| (acc << 1) | usize::from(b != 0));
        Self::basis(bits.len(), index)
    }

    /// Número de qubits
    #[inline]
    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Dimensão (`2^qubits`)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude no índice `index`
    #[inline]
    pub fn amplitude(&self, index: usize) -> Option<Amplitude> {
        self.amplitudes.get(index).copied()
    }

    #[inline]
    pub fn amplitudes(&self) -> &[Amplitude] {
        &self.amplitudes
    }

    /// Popula uma amplitude
    pub fn set_amplitude(&mut self, index: usize, value: Amplitude) -> QuantumResult<()> {
        let dimension = self.dimension();
        let slot = self
            .amplitudes
            .get_mut(index)
            .ok_or(QuantumError::IndexOutOfRange { index, dimension })?;
        *slot = value;
        Ok(())
    }

    /// Devolve o buffer ao chamador
    pub fn into_amplitudes(self) -> Vec<Amplitude> {
        self.amplitudes
    }

    /// Soma dos módulos ao quadrado
    pub fn norm_sqr(&self) -> f64 {
        algebra::norm_sqr(&self.amplitudes)
    }

    pub fn is_normalized(&self, tolerance: f64) -> bool {
        self.check_normalized(tolerance).is_none()
    }

    /// Diagnóstico de norma: `Some` quando `|Σ|a|² - 1| > tolerance`
    pub fn check_normalized(&self, tolerance: f64) -> Option<UnnormalizedState> {
        let norm_sqr = self.norm_sqr();
        ((norm_sqr - 1.0).abs() > tolerance).then_some(UnnormalizedState { norm_sqr, tolerance })
    }

    /// Probabilidade de cada rótulo da base (`|a_i|²`)
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Normaliza in-place para norma unitária
    pub fn normalize(&mut self) -> QuantumResult<()> {
        self.normalize_with(NormalizationMode::Euclidean)
    }

    /// Normaliza in-place com a fórmula escolhida
    pub fn normalize_with(&mut self, mode: NormalizationMode) -> QuantumResult<()> {
        let norm_sqr = self.norm_sqr();
        if norm_sqr == 0.0 || !norm_sqr.is_finite() {
            return Err(QuantumError::ZeroNorm);
        }
        let scale = mode.scale_factor(norm_sqr);
        for a in &mut self.amplitudes {
            *a *= scale;
        }
        Ok(())
    }

    /// Novo estado com cada amplitude conjugada
    pub fn conjugate(&self) -> State {
        Self {
            qubits: self.qubits,
            amplitudes: algebra::conjugate(&self.amplitudes),
        }
    }

    /// Produto tensorial `self ⊗ other`; `self` ocupa os qubits de ordem alta
    pub fn tensor(&self, other: &State) -> QuantumResult<State> {
        let qubits = self.qubits + other.qubits;
        dimension_for(qubits, MAX_STATE_QUBITS)?;

        let amplitudes = algebra::kron(
            &self.amplitudes,
            Shape::new(self.dimension(), 1),
            &other.amplitudes,
            Shape::new(other.dimension(), 1),
        );
        tracing::debug!(left = self.qubits, right = other.qubits, "state tensor");
        Ok(Self { qubits, amplitudes })
    }

    /// Compara amplitudes com tolerância absoluta
    pub fn approx_eq(&self, other: &State, tolerance: f64) -> bool {
        self.qubits == other.qubits
            && algebra::approx_eq(&self.amplitudes, &other.amplitudes, tolerance)
    }

    /// Cópia contendo só as amplitudes cujo `qubit` vale `bit`
    pub(crate) fn project(&self, qubit: usize, bit: u8) -> State {
        let amplitudes = self
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                if bit_at(i, qubit, self.qubits) == bit {
                    a
                } else {
                    Amplitude::new(0.0, 0.0)
                }
            })
            .collect();
        Self {
            qubits: self.qubits,
            amplitudes,
        }
    }

    pub(crate) fn from_parts(qubits: usize, amplitudes: Vec<Amplitude>) -> Self {
        debug_assert_eq!(amplitudes.len(), 1 << qubits);
        Self { qubits, amplitudes }
    }
}
