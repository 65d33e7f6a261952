//! # ⚛️ qcirc-gates — Catálogo de Portas e Estados
//!
//! Fábricas de [`Operator`](qcirc_core::Operator) e [`State`](qcirc_core::State)
//! para as portas e estados de um qubit mais comuns.
//!
//! ## Computational Complexity
//!
//! **Construction:**
//! - Single-qubit gates: O(1)
//! - Controlled, permutation and identity: O(4^n) dense entries
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          catalog::by_name                       │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  gates: H, X, Y, Z, S, T, V, G, Rx/Ry/Rz  │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  controlled: C(U), Permutation, Toffoli   │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  states: |0⟩ |1⟩ |+⟩ |−⟩ aleatório         │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qcirc_gates::{cx, states, Hadamard, Identity, QuantumGate};
//!
//! let h0 = Hadamard.operator().unwrap().tensor(&Identity::new(1).operator().unwrap()).unwrap();
//! let circuit = cx().operator().unwrap().compose(&h0).unwrap();
//!
//! let zero = states::zero().unwrap().tensor(&states::zero().unwrap()).unwrap();
//! let bell = circuit.apply(&zero).unwrap();
//! assert!((bell.probabilities()[3] - 0.5).abs() < 1e-12);
//! ```

pub mod catalog;
pub mod controlled;
pub mod error;
pub mod gates;
pub mod states;

pub use catalog::{by_name, GATE_NAMES};
pub use controlled::{crot_z, ct, cx, cy, cz, Controlled, Permutation, Toffoli};
pub use error::{GateError, GateResult};
pub use gates::{
    lift, QuantumGate, UNITARY_TOLERANCE,
    Identity, Hadamard, PauliX, PauliY, PauliZ, SGate, TGate, TDagger,
    VGate, VDagger, GGate, GDagger, RotationX, RotationY, RotationZ, PhaseTurn,
};
