//! Engine configurável sobre a álgebra de estados e operadores

use crate::config::SimConfig;
use crate::error::{QuantumError, QuantumResult, UnnormalizedState};
use crate::measure::Distribution;
use crate::operator::Operator;
use crate::state::State;

/// Resultado acompanhado dos diagnósticos de norma das entradas.
///
/// Em modo não estrito, estados não normalizados não falham: cada desvio
/// encontrado fica em `warnings`, na ordem em que as entradas foram lidas.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub warnings: Vec<UnnormalizedState>,
}

impl<T> Checked<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Verdadeiro quando todas as entradas estavam normalizadas
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Primeiro diagnóstico, se houver
    pub fn warning(&self) -> Option<&UnnormalizedState> {
        self.warnings.first()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Fachada que aplica a [`SimConfig`] às operações do núcleo
#[derive(Debug, Clone)]
pub struct QuantumEngine {
    config: SimConfig,
}

impl QuantumEngine {
    /// Cria engine com configuração padrão
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
        }
    }

    /// Cria engine com configuração customizada
    pub fn with_config(config: SimConfig) -> QuantumResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Rejeita registradores acima de `max_qubits`
    fn check_qubits(&self, qubits: usize) -> QuantumResult<()> {
        if qubits > self.config.max_qubits {
            return Err(QuantumError::InvalidDimension {
                qubits,
                reason: "exceeds the configured max_qubits",
            });
        }
        Ok(())
    }

    /// Verifica a norma de um estado consumido por fidelidade ou medição.
    ///
    /// Em modo estrito o desvio vira erro; caso contrário é emitido como
    /// aviso e devolvido ao chamador.
    pub fn check_normalized(&self, state: &State) -> QuantumResult<Option<UnnormalizedState>> {
        match state.check_normalized(self.config.tolerance) {
            None => Ok(None),
            Some(warning) if self.config.strict_normalization => Err(warning.into()),
            Some(warning) => {
                tracing::warn!(
                    norm_sqr = warning.norm_sqr,
                    tolerance = warning.tolerance,
                    "unnormalized state"
                );
                Ok(Some(warning))
            }
        }
    }

    /// Estado zerado de `qubits` qubits
    pub fn state(&self, qubits: usize) -> QuantumResult<State> {
        self.check_qubits(qubits)?;
        State::zeroed(qubits)
    }

    /// Operador zerado de `qubits` qubits
    pub fn operator(&self, qubits: usize) -> QuantumResult<Operator> {
        self.check_qubits(qubits)?;
        Operator::zeroed(qubits)
    }

    /// Normaliza com a fórmula configurada
    pub fn normalize(&self, state: &mut State) -> QuantumResult<()> {
        state.normalize_with(self.config.normalization)
    }

    pub fn tensor_states(&self, a: &State, b: &State) -> QuantumResult<State> {
        self.check_qubits(a.qubits() + b.qubits())?;
        a.tensor(b)
    }

    pub fn tensor_operators(&self, a: &Operator, b: &Operator) -> QuantumResult<Operator> {
        self.check_qubits(a.qubits() + b.qubits())?;
        a.tensor(b)
    }

    /// `op · state`
    pub fn apply(&self, op: &Operator, state: &State) -> QuantumResult<State> {
        op.apply(state)
    }

    /// `a · b`: aplica `b`, depois `a`
    pub fn compose(&self, a: &Operator, b: &Operator) -> QuantumResult<Operator> {
        a.compose(b)
    }

    /// Aplica uma sequência de operadores na ordem dada
    pub fn run<'a, I>(&self, state: &State, ops: I) -> QuantumResult<State>
    where
        I: IntoIterator<Item = &'a Operator>,
    {
        let mut current = state.clone();
        for op in ops {
            current = op.apply(&current)?;
        }
        Ok(current)
    }

    /// Acumula o diagnóstico de `state` em `warnings`
    fn collect_warning(
        &self,
        state: &State,
        warnings: &mut Vec<UnnormalizedState>,
    ) -> QuantumResult<()> {
        warnings.extend(self.check_normalized(state)?);
        Ok(())
    }

    pub fn fidelity(&self, a: &State, b: &State) -> QuantumResult<Checked<f64>> {
        let mut warnings = Vec::new();
        self.collect_warning(a, &mut warnings)?;
        self.collect_warning(b, &mut warnings)?;
        Ok(Checked {
            value: a.fidelity(b)?,
            warnings,
        })
    }

    pub fn is_unitary(&self, op: &Operator) -> bool {
        op.is_unitary(self.config.tolerance)
    }

    /// Mede `qubit` de um estado puro
    pub fn measure(&self, state: &State, qubit: usize) -> QuantumResult<Checked<Distribution>> {
        let mut warnings = Vec::new();
        self.collect_warning(state, &mut warnings)?;
        let distribution = state.measure(qubit)?;
        Ok(Checked {
            value: self.finish(distribution),
            warnings,
        })
    }

    /// Mede `qubit` em cada ramo de uma distribuição existente
    pub fn measure_distribution(
        &self,
        distribution: &Distribution,
        qubit: usize,
    ) -> QuantumResult<Checked<Distribution>> {
        distribution.validate(self.config.tolerance)?;
        let mut warnings = Vec::new();
        for branch in distribution.iter() {
            self.collect_warning(branch.state(), &mut warnings)?;
        }
        let measured = distribution.measure(qubit)?;
        Ok(Checked {
            value: self.finish(measured),
            warnings,
        })
    }

    /// Mede os qubits em sequência, começando de um estado puro
    pub fn measure_sequence(
        &self,
        state: &State,
        qubits: &[usize],
    ) -> QuantumResult<Checked<Distribution>> {
        let mut checked = Checked::new(Distribution::certain(state.clone()));
        self.collect_warning(state, &mut checked.warnings)?;
        for &qubit in qubits {
            checked.value = self.finish(checked.value.measure(qubit)?);
        }
        Ok(checked)
    }

    fn finish(&self, distribution: Distribution) -> Distribution {
        if self.config.merge_branches {
            distribution.merge_identical(self.config.tolerance)
        } else {
            distribution
        }
    }
}

impl Default for QuantumEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizationMode;
    use crate::Amplitude;

    #[test]
    fn test_create_engine() {
        let engine = QuantumEngine::new();
        assert_eq!(engine.config(), &SimConfig::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            tolerance: 0.0,
            ..SimConfig::default()
        };
        assert!(QuantumEngine::with_config(config).is_err());
    }

    #[test]
    fn test_max_qubits_enforced() {
        let engine = QuantumEngine::with_config(SimConfig {
            max_qubits: 2,
            ..SimConfig::default()
        })
        .unwrap();

        assert!(engine.state(2).is_ok());
        assert!(matches!(engine.state(3), Err(QuantumError::InvalidDimension { .. })));

        let a = State::basis(2, 0).unwrap();
        let b = State::basis(1, 0).unwrap();
        assert!(matches!(
            engine.tensor_states(&a, &b),
            Err(QuantumError::InvalidDimension { qubits: 3, .. })
        ));
    }

    #[test]
    fn test_unnormalized_warning_is_returned() {
        let engine = QuantumEngine::new();
        let state =
            State::from_amplitudes(1, vec![Amplitude::new(1.0, 0.0), Amplitude::new(1.0, 0.0)]).unwrap();

        let warning = engine.check_normalized(&state).unwrap().unwrap();
        assert!((warning.norm_sqr - 2.0).abs() < 1e-12);

        // não fatal: a medição prossegue e devolve o diagnóstico
        let measured = engine.measure(&state, 0).unwrap();
        assert_eq!(measured.value.len(), 2);
        assert_eq!(measured.warning(), Some(&warning));

        let fidelity = engine.fidelity(&state, &state).unwrap();
        assert!((fidelity.value - 2.0).abs() < 1e-12);
        assert_eq!(fidelity.warnings, vec![warning, warning]);

        let sequence = engine.measure_sequence(&state, &[0]).unwrap();
        assert_eq!(sequence.warnings.len(), 1);
    }

    #[test]
    fn test_normalized_inputs_are_clean() {
        let engine = QuantumEngine::new();
        let state = State::basis(1, 1).unwrap();

        let fidelity = engine.fidelity(&state, &state).unwrap();
        assert!(fidelity.is_clean());
        assert!((fidelity.into_value() - 1.0).abs() < 1e-12);

        let measured = engine.measure(&state, 0).unwrap();
        assert!(measured.is_clean());

        let again = engine.measure_distribution(&measured.value, 0).unwrap();
        assert!(again.is_clean());
        assert_eq!(again.value.len(), 1);
    }

    #[test]
    fn test_strict_normalization_fails() {
        let engine = QuantumEngine::with_config(SimConfig {
            strict_normalization: true,
            ..SimConfig::default()
        })
        .unwrap();
        let state =
            State::from_amplitudes(1, vec![Amplitude::new(1.0, 0.0), Amplitude::new(1.0, 0.0)]).unwrap();

        assert!(matches!(
            engine.fidelity(&state, &state),
            Err(QuantumError::UnnormalizedState { .. })
        ));
    }

    #[test]
    fn test_normalize_follows_config() {
        let legacy = QuantumEngine::with_config(SimConfig {
            normalization: NormalizationMode::InverseSquareSum,
            ..SimConfig::default()
        })
        .unwrap();
        let mut state =
            State::from_amplitudes(1, vec![Amplitude::new(2.0, 0.0), Amplitude::new(0.0, 0.0)]).unwrap();
        legacy.normalize(&mut state).unwrap();
        assert!((state.amplitudes()[0].re - 0.5).abs() < 1e-12);

        let mut state =
            State::from_amplitudes(1, vec![Amplitude::new(2.0, 0.0), Amplitude::new(0.0, 0.0)]).unwrap();
        QuantumEngine::new().normalize(&mut state).unwrap();
        assert!((state.amplitudes()[0].re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measure_sequence_merges() {
        let engine = QuantumEngine::new();
        let h = 0.5;
        let state = State::from_amplitudes(2, vec![Amplitude::new(h, 0.0); 4]).unwrap();

        let dist = engine.measure_sequence(&state, &[0, 0, 1]).unwrap().value;
        assert_eq!(dist.len(), 4);
        assert!((dist.total_probability() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_measure_distribution_validates_input() {
        let engine = QuantumEngine::new();
        let state = State::basis(1, 0).unwrap();
        let dist = Distribution::certain(state);
        assert!(engine.measure_distribution(&dist, 0).is_ok());
        assert!(matches!(
            engine.measure_distribution(&dist, 1),
            Err(QuantumError::InvalidQubitIndex { index: 1, qubits: 1 })
        ));
    }

    #[test]
    fn test_run_applies_in_order() {
        let engine = QuantumEngine::new();
        let x = Operator::from_fn(1, |r, c| Amplitude::new(if r != c { 1.0 } else { 0.0 }, 0.0)).unwrap();
        let zero = State::basis(1, 0).unwrap();

        let out = engine.run(&zero, [&x, &x, &x]).unwrap();
        assert_eq!(out, State::basis(1, 1).unwrap());
    }
}
