//! Configuração do simulador
//!
//! Carregada de TOML (`SimConfig::load`) ou de variáveis de ambiente,
//! com `.env` lido automaticamente (`SimConfig::from_env`).

use crate::error::{QuantumError, QuantumResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Teto absoluto de qubits para estados (2^30 amplitudes = 16 GiB)
pub const MAX_STATE_QUBITS: usize = 30;

/// Teto absoluto de qubits para operadores (4^15 entradas = 16 GiB)
pub const MAX_OPERATOR_QUBITS: usize = 15;

/// Tolerância padrão para comparações numéricas
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Limite padrão de qubits aceito pelo engine
pub const DEFAULT_MAX_QUBITS: usize = 20;

static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Fórmula de normalização
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Escala por `1/sqrt(Σ|a|²)`: resultado tem norma unitária
    #[default]
    Euclidean,
    /// Escala por `1/Σ|a|²`, o comportamento legado observado.
    /// Só produz norma unitária quando a entrada já tinha norma 1.
    InverseSquareSum,
}

impl NormalizationMode {
    /// Fator de escala para uma soma de módulos ao quadrado
    pub fn scale_factor(self, norm_sqr: f64) -> f64 {
        match self {
            Self::Euclidean => 1.0 / norm_sqr.sqrt(),
            Self::InverseSquareSum => 1.0 / norm_sqr,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::InverseSquareSum => "inverse_square_sum",
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for NormalizationMode {
    type Err = QuantumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "inverse_square_sum" | "legacy" => Ok(Self::InverseSquareSum),
            other => Err(QuantumError::Config(format!(
                "unknown normalization mode '{}'",
                other
            ))),
        }
    }
}

/// Configuração do engine quântico
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Tolerância para norma, igualdade e soma de probabilidades
    pub tolerance: f64,
    /// Máximo de qubits aceito em alocação e produto tensorial
    pub max_qubits: usize,
    /// Fórmula usada por `normalize`
    pub normalization: NormalizationMode,
    /// Estados não normalizados viram erro em vez de aviso
    pub strict_normalization: bool,
    /// Funde ramos com estados iguais após medição
    pub merge_branches: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_qubits: DEFAULT_MAX_QUBITS,
            normalization: NormalizationMode::Euclidean,
            strict_normalization: false,
            merge_branches: true,
        }
    }
}

impl SimConfig {
    /// Interpreta configuração TOML; campos ausentes usam o padrão
    pub fn from_toml_str(content: &str) -> QuantumResult<Self> {
        let config: SimConfig = toml::from_str(content)
            .map_err(|e| QuantumError::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Lê configuração de um arquivo TOML
    pub fn load(path: impl AsRef<Path>) -> QuantumResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QuantumError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Configuração a partir do ambiente (`QCIRC_*`), após carregar `.env`
    pub fn from_env() -> QuantumResult<Self> {
        ensure_loaded();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Configuração a partir de uma fonte de variáveis `QCIRC_*`.
    ///
    /// Valores vazios são ignorados; os ausentes usam o padrão.
    pub fn from_lookup<F>(lookup: F) -> QuantumResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = var("QCIRC_TOLERANCE") {
            config.tolerance = parse_var("QCIRC_TOLERANCE", &v)?;
        }
        if let Some(v) = var("QCIRC_MAX_QUBITS") {
            config.max_qubits = parse_var("QCIRC_MAX_QUBITS", &v)?;
        }
        if let Some(v) = var("QCIRC_NORMALIZATION") {
            config.normalization = v.trim().parse()?;
        }
        if let Some(v) = var("QCIRC_STRICT_NORMALIZATION") {
            config.strict_normalization = parse_var("QCIRC_STRICT_NORMALIZATION", &v)?;
        }
        if let Some(v) = var("QCIRC_MERGE_BRANCHES") {
            config.merge_branches = parse_var("QCIRC_MERGE_BRANCHES", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Valida limites da configuração
    pub fn validate(&self) -> QuantumResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(QuantumError::Config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_qubits == 0 || self.max_qubits > MAX_STATE_QUBITS {
            return Err(QuantumError::Config(format!(
                "max_qubits must be in 1..={}, got {}",
                MAX_STATE_QUBITS, self.max_qubits
            )));
        }
        Ok(())
    }

    /// Serializa para TOML
    pub fn to_toml_string(&self) -> QuantumResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| QuantumError::Config(format!("failed to serialize config: {}", e)))
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> QuantumResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| QuantumError::Config(format!("invalid value for {}: '{}'", key, value)))
}
