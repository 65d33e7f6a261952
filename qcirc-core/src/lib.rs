//! # ⚛️ qcirc-core — Dense Quantum Circuit Algebra
//!
//! Simulação densa de estados puros e operadores lineares sobre registradores
//! de poucos qubits: produto tensorial, aplicação, composição, fidelidade e
//! medição projetiva com distribuições de ramos colapsados.
//!
//! ## Computational Complexity
//!
//! **Memory — O(2^n) per state, O(4^n) per operator:**
//! - Memory is the binding constraint, not CPU
//! - Hard ceilings: 30 qubits for states, 15 for operators
//!
//! **Algebra:**
//! - Tensor: O(dim(a) × dim(b))
//! - Apply: O(4^n)
//! - Compose: O(8^n)
//! - Fidelity: O(2^n)
//! - Measurement: O(B × 2^n) for B branches
//!
//! **Scalability:**
//! - Small registers (n < 10): ✓ Excellent
//! - Medium registers (10 < n < 14): △ Operators dominate memory
//! - Large registers (n > 20): states only, avoid dense operators
//!
//! With the `parallel` feature the row loops of tensor/apply/compose and the
//! branch loop of distribution measurement run on rayon.
//!
//! ## Convenção de índices
//!
//! O índice `i` de um estado é o rótulo da base computacional cujos bits, do
//! mais significativo ao menos significativo, são os qubits `0..n`. Em
//! `a ⊗ b`, `a` ocupa os qubits de ordem alta.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          QuantumEngine (SimConfig)              │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  State / Operator (representação)         │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  algebra: kron, matvec, matmul            │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  fidelity · measure (Distribution)        │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qcirc_core::prelude::*;
//!
//! let zero = State::basis(1, 0).unwrap();
//! let one = State::basis(1, 1).unwrap();
//!
//! let joint = zero.tensor(&one).unwrap();
//! assert_eq!(joint.amplitude(1), Some(Amplitude::new(1.0, 0.0)));
//!
//! let dist = joint.measure(0).unwrap();
//! assert_eq!(dist.len(), 1);
//! assert!((joint.fidelity(&joint).unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod algebra;
pub mod config;
pub mod engine;
pub mod error;
pub mod fidelity;
pub mod measure;
pub mod operator;
pub mod state;

pub use num_complex;

/// Escalar complexo de precisão dupla
pub type Amplitude = num_complex::Complex64;

pub use config::{
    NormalizationMode, SimConfig,
    DEFAULT_MAX_QUBITS, DEFAULT_TOLERANCE, MAX_OPERATOR_QUBITS, MAX_STATE_QUBITS,
};
pub use engine::{Checked, QuantumEngine};
pub use error::{QuantumError, QuantumResult, UnnormalizedState};
pub use fidelity::{fidelity, inner_product};
pub use measure::{measure, Bit, Branch, Distribution, Register};
pub use operator::Operator;
pub use state::{bit_at, State};

/// Re-exports of the most commonly used items.
pub mod prelude {
    pub use crate::Amplitude;
    pub use crate::engine::{Checked, QuantumEngine};
    pub use crate::error::{QuantumError, QuantumResult};
    pub use crate::measure::{Bit, Branch, Distribution, Register};
    pub use crate::operator::Operator;
    pub use crate::state::State;
    pub use crate::config::SimConfig;
}
