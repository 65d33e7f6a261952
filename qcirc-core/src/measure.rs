//! Medição projetiva e distribuições de estados
//!
//! ## Máquina de estados
//!
//! ```text
//!   Register::Unmeasured(State)
//!            │ measure(q)
//!            ▼
//!   Register::Measured(Distribution) ──measure(q')──┐
//!            ▲                                      │
//!            └──────────────────────────────────────┘
//! ```
//!
//! Medir o qubit `q` separa os rótulos da base pelo bit `q` (mesma convenção
//! do produto tensorial: qubit 0 é o bit mais significativo). Cada subconjunto
//! com probabilidade não nula vira um ramo: as amplitudes fora do subconjunto
//! são zeradas e o resultado é renormalizado. Cada [`Branch`] registra os bits
//! já determinados; medir de novo um qubit registrado devolve um único ramo
//! com probabilidade condicional 1.
//!
//! ## Computational Complexity
//!
//! - Single state: O(2^n) to accumulate weights, O(2^n) per surviving branch
//! - Distribution with B branches: O(B × 2^n), branches are independent
//! - `merge_identical`: O(B² × 2^n)

use crate::error::{QuantumError, QuantumResult};
use crate::state::{bit_at, State};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Resultado de um qubit medido
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Bit {
    Zero = 0,
    One = 1,
}

impl Bit {
    pub const BOTH: [Bit; 2] = [Bit::Zero, Bit::One];

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_u8(value: u8) -> Self {
        if value == 0 { Self::Zero } else { Self::One }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Ramo de uma distribuição: estado colapsado e seu peso
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    state: State,
    probability: f64,
    /// qubit → bit determinado neste ramo
    outcomes: BTreeMap<usize, Bit>,
}

impl Branch {
    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Bits determinados por medições anteriores
    pub fn outcomes(&self) -> &BTreeMap<usize, Bit> {
        &self.outcomes
    }

    /// Bit determinado de `qubit`, se já medido
    pub fn outcome(&self, qubit: usize) -> Option<Bit> {
        self.outcomes.get(&qubit).copied()
    }

    pub fn into_state(self) -> State {
        self.state
    }
}

/// Coleção ordenada e não vazia de (estado, probabilidade)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    branches: Vec<Branch>,
}

/// Separa `state` pelo bit de `qubit`: `(bit, probabilidade condicional, ramo)`
fn collapse(state: &State, qubit: usize) -> QuantumResult<Vec<(Bit, f64, State)>> {
    let qubits = state.qubits();
    if qubit >= qubits {
        return Err(QuantumError::InvalidQubitIndex {
            index: qubit,
            qubits,
        });
    }

    let mut weights = [0.0f64; 2];
    for (i, a) in state.amplitudes().iter().enumerate() {
        weights[bit_at(i, qubit, qubits) as usize] += a.norm_sqr();
    }
    let total = weights[0] + weights[1];
    if total == 0.0 || !total.is_finite() {
        return Err(QuantumError::ZeroNorm);
    }

    let mut outcomes = Vec::with_capacity(2);
    for bit in Bit::BOTH {
        let weight = weights[bit as usize];
        if weight <= 0.0 {
            continue;
        }
        let mut branch = state.project(qubit, bit.as_u8());
        branch.normalize()?;
        tracing::trace!(qubit, bit = bit.as_u8(), probability = weight / total, "measurement branch");
        outcomes.push((bit, weight / total, branch));
    }
    Ok(outcomes)
}

/// Mede `qubit` de um estado puro
pub fn measure(state: &State, qubit: usize) -> QuantumResult<Distribution> {
    Distribution::certain(state.clone()).measure(qubit)
}

impl State {
    /// Atalho para [`measure`]
    pub fn measure(&self, qubit: usize) -> QuantumResult<Distribution> {
        measure(self, qubit)
    }
}

impl Distribution {
    /// Distribuição com um único ramo de probabilidade 1
    pub fn certain(state: State) -> Self {
        Self {
            branches: vec![Branch {
                state,
                probability: 1.0,
                outcomes: BTreeMap::new(),
            }],
        }
    }

    /// Cria distribuição validando probabilidades e registradores
    pub fn from_branches(pairs: Vec<(State, f64)>, tolerance: f64) -> QuantumResult<Self> {
        let distribution = Self {
            branches: pairs
                .into_iter()
                .map(|(state, probability)| Branch {
                    state,
                    probability,
                    outcomes: BTreeMap::new(),
                })
                .collect(),
        };
        distribution.validate(tolerance)?;
        Ok(distribution)
    }

    /// Verifica: não vazia, probabilidades em [0, 1] somando 1, mesmo registrador
    pub fn validate(&self, tolerance: f64) -> QuantumResult<()> {
        let first = self
            .branches
            .first()
            .ok_or_else(|| QuantumError::InvalidDistribution("no branches".into()))?;

        for branch in &self.branches {
            if branch.state.qubits() != first.state.qubits() {
                return Err(QuantumError::DimensionMismatch {
                    expected: first.state.qubits(),
                    found: branch.state.qubits(),
                });
            }
            if !(0.0..=1.0).contains(&branch.probability) {
                return Err(QuantumError::InvalidDistribution(format!(
                    "probability {} outside [0, 1]",
                    branch.probability
                )));
            }
        }

        let total = self.total_probability();
        if (total - 1.0).abs() > tolerance {
            return Err(QuantumError::InvalidDistribution(format!(
                "probabilities sum to {}",
                total
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Sempre falso para distribuições construídas pela API
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Qubits do registrador comum a todos os ramos
    pub fn qubits(&self) -> usize {
        self.branches.first().map_or(0, |b| b.state.qubits())
    }

    pub fn total_probability(&self) -> f64 {
        self.branches.iter().map(|b| b.probability).sum()
    }

    /// Probabilidade de observar `bit` ao medir `qubit`
    pub fn probability_of(&self, qubit: usize, bit: Bit) -> QuantumResult<f64> {
        let mut total = 0.0;
        for branch in &self.branches {
            for (outcome, p, _) in collapse(&branch.state, qubit)? {
                if outcome == bit {
                    total += branch.probability * p;
                }
            }
        }
        Ok(total)
    }

    /// Mede `qubit` em cada ramo; pesos = prior × probabilidade condicional
    pub fn measure(&self, qubit: usize) -> QuantumResult<Distribution> {
        let split = |branch: &Branch| -> QuantumResult<Vec<Branch>> {
            Ok(collapse(&branch.state, qubit)?
                .into_iter()
                .map(|(bit, p, state)| {
                    let mut outcomes = branch.outcomes.clone();
                    outcomes.insert(qubit, bit);
                    Branch {
                        state,
                        probability: branch.probability * p,
                        outcomes,
                    }
                })
                .collect())
        };

        #[cfg(feature = "parallel")]
        let nested: QuantumResult<Vec<Vec<Branch>>> = {
            use rayon::prelude::*;
            self.branches.par_iter().map(split).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let nested: QuantumResult<Vec<Vec<Branch>>> = self.branches.iter().map(split).collect();

        let branches: Vec<Branch> = nested?.into_iter().flatten().collect();
        tracing::debug!(qubit, branches = branches.len(), "distribution measured");
        Ok(Distribution { branches })
    }

    /// Funde ramos cujos estados coincidem dentro da tolerância
    pub fn merge_identical(self, tolerance: f64) -> Distribution {
        let mut merged: Vec<Branch> = Vec::with_capacity(self.branches.len());
        for branch in self.branches {
            match merged
                .iter_mut()
                .find(|m| m.state.approx_eq(&branch.state, tolerance))
            {
                Some(existing) => existing.probability += branch.probability,
                None => merged.push(branch),
            }
        }
        Distribution { branches: merged }
    }

    /// Colapsa para um ramo sorteado pelo peso acumulado
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &Branch {
        let target = rng.r#gen::<f64>() * self.total_probability();
        let mut cumulative = 0.0;
        for branch in &self.branches {
            cumulative += branch.probability;
            if target < cumulative {
                return branch;
            }
        }
        // Arredondamento pode deixar `target` acima da soma parcial
        &self.branches[self.branches.len() - 1]
    }

    pub fn into_branches(self) -> Vec<Branch> {
        self.branches
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = &'a Branch;
    type IntoIter = std::slice::Iter<'a, Branch>;

    fn into_iter(self) -> Self::IntoIter {
        self.branches.iter()
    }
}

/// Registrador: estado ainda não medido ou distribuição após medições
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Register {
    Unmeasured(State),
    Measured(Distribution),
}

impl Register {
    pub fn new(state: State) -> Self {
        Self::Unmeasured(state)
    }

    /// Transição: mede `qubit` e devolve o registrador medido
    pub fn measure(&self, qubit: usize) -> QuantumResult<Register> {
        let distribution = match self {
            Self::Unmeasured(state) => measure(state, qubit)?,
            Self::Measured(distribution) => distribution.measure(qubit)?,
        };
        Ok(Self::Measured(distribution))
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, Self::Measured(_))
    }

    pub fn qubits(&self) -> usize {
        match self {
            Self::Unmeasured(state) => state.qubits(),
            Self::Measured(distribution) => distribution.qubits(),
        }
    }

    pub fn distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Unmeasured(_) => None,
            Self::Measured(distribution) => Some(distribution),
        }
    }

    /// Distribuição equivalente; estado não medido vira ramo certo
    pub fn into_distribution(self) -> Distribution {
        match self {
            Self::Unmeasured(state) => Distribution::certain(state),
            Self::Measured(distribution) => distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amplitude;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn bell() -> State {
        let h = FRAC_1_SQRT_2;
        State::from_amplitudes(
            2,
            vec![
                Amplitude::new(h, 0.0),
                Amplitude::new(0.0, 0.0),
                Amplitude::new(0.0, 0.0),
                Amplitude::new(h, 0.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_measure_basis_state_is_certain() {
        // |0⟩ ⊗ |1⟩, qubit 0 vale 0
        let state = State::from_bits(&[0, 1]).unwrap();
        let dist = measure(&state, 0).unwrap();

        assert_eq!(dist.len(), 1);
        let branch = &dist.branches()[0];
        assert_eq!(branch.probability(), 1.0);
        assert_eq!(branch.outcome(0), Some(Bit::Zero));
        assert_eq!(branch.state(), &state);
    }

    #[test]
    fn test_measure_superposition_splits() {
        let h = FRAC_1_SQRT_2;
        let plus = State::from_amplitudes(1, vec![Amplitude::new(h, 0.0); 2]).unwrap();
        let dist = plus.measure(0).unwrap();

        assert_eq!(dist.len(), 2);
        for branch in &dist {
            assert!((branch.probability() - 0.5).abs() < 1e-12);
            assert!(branch.state().is_normalized(1e-12));
        }
        assert!(dist.branches()[0].state().approx_eq(&State::basis(1, 0).unwrap(), 1e-12));
        assert!(dist.branches()[1].state().approx_eq(&State::basis(1, 1).unwrap(), 1e-12));
    }

    #[test]
    fn test_unequal_weights() {
        let state =
            State::from_amplitudes(1, vec![Amplitude::new(0.6, 0.0), Amplitude::new(0.0, 0.8)]).unwrap();
        let dist = measure(&state, 0).unwrap();

        assert!((dist.branches()[0].probability() - 0.36).abs() < 1e-12);
        assert!((dist.branches()[1].probability() - 0.64).abs() < 1e-12);
        // fase preservada no ramo colapsado
        assert!((dist.branches()[1].state().amplitudes()[1].im - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_qubit_index() {
        let state = State::basis(2, 0).unwrap();
        assert_eq!(
            measure(&state, 2),
            Err(QuantumError::InvalidQubitIndex { index: 2, qubits: 2 })
        );
    }

    #[test]
    fn test_zero_vector_cannot_be_measured() {
        let state = State::zeroed(1).unwrap();
        assert_eq!(measure(&state, 0), Err(QuantumError::ZeroNorm));
    }

    #[test]
    fn test_unnormalized_state_probabilities_sum_to_one() {
        let state =
            State::from_amplitudes(1, vec![Amplitude::new(3.0, 0.0), Amplitude::new(4.0, 0.0)]).unwrap();
        let dist = measure(&state, 0).unwrap();

        assert!((dist.total_probability() - 1.0).abs() < 1e-12);
        assert!((dist.branches()[0].probability() - 9.0 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_repeat_measurement_is_idempotent() {
        let first = measure(&bell(), 1).unwrap();
        let second = first.measure(1).unwrap();

        assert_eq!(second.len(), first.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert!(a.state().approx_eq(b.state(), 1e-12));
            assert!((a.probability() - b.probability()).abs() < 1e-12);
            assert_eq!(a.outcome(1), b.outcome(1));
        }
    }

    #[test]
    fn test_bell_correlation() {
        // Medir q0 de |Φ+⟩ determina q1
        let dist = measure(&bell(), 0).unwrap().measure(1).unwrap();

        assert_eq!(dist.len(), 2);
        for branch in &dist {
            assert_eq!(branch.outcome(0), branch.outcome(1));
            assert!((branch.probability() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_independent_qubits_give_four_branches() {
        let h = 0.5;
        let state = State::from_amplitudes(2, vec![Amplitude::new(h, 0.0); 4]).unwrap();
        let dist = measure(&state, 0).unwrap().measure(1).unwrap();

        assert_eq!(dist.len(), 4);
        assert!((dist.total_probability() - 1.0).abs() < 1e-12);
        assert!((dist.probability_of(1, Bit::One).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_merge_identical() {
        let zero = State::basis(1, 0).unwrap();
        let one = State::basis(1, 1).unwrap();
        let dist = Distribution::from_branches(
            vec![(zero.clone(), 0.25), (one, 0.5), (zero.clone(), 0.25)],
            1e-9,
        )
        .unwrap();

        let merged = dist.merge_identical(1e-9);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.branches()[0].state(), &zero);
        assert!((merged.branches()[0].probability() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_branches_validation() {
        let zero = State::basis(1, 0).unwrap();
        assert!(matches!(
            Distribution::from_branches(vec![], 1e-9),
            Err(QuantumError::InvalidDistribution(_))
        ));
        assert!(matches!(
            Distribution::from_branches(vec![(zero.clone(), 0.7)], 1e-9),
            Err(QuantumError::InvalidDistribution(_))
        ));
        assert!(matches!(
            Distribution::from_branches(vec![(zero.clone(), 1.5), (zero.clone(), -0.5)], 1e-9),
            Err(QuantumError::InvalidDistribution(_))
        ));
        assert!(matches!(
            Distribution::from_branches(
                vec![(zero, 0.5), (State::basis(2, 0).unwrap(), 0.5)],
                1e-9
            ),
            Err(QuantumError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_sample_is_reproducible() {
        let dist = measure(&bell(), 0).unwrap();

        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            assert_eq!(dist.sample(&mut rng_a), dist.sample(&mut rng_b));
        }
    }

    #[test]
    fn test_sample_certain_distribution() {
        let state = State::basis(1, 1).unwrap();
        let dist = Distribution::certain(state.clone());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(dist.sample(&mut rng).state(), &state);
    }

    #[test]
    fn test_register_state_machine() {
        let register = Register::new(bell());
        assert!(!register.is_measured());
        assert!(register.distribution().is_none());

        let measured = register.measure(0).unwrap();
        assert!(measured.is_measured());
        assert_eq!(measured.qubits(), 2);

        let again = measured.measure(0).unwrap();
        assert_eq!(again.distribution().unwrap().len(), 2);

        assert_eq!(Register::new(bell()).into_distribution().len(), 1);
    }
}
