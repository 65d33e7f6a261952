//! Busca de portas por nome

use crate::controlled::{crot_z, ct, cx, cy, cz, Permutation, Toffoli};
use crate::error::{GateError, GateResult};
use crate::gates::*;

/// Nomes aceitos por [`by_name`]
pub const GATE_NAMES: &[&str] = &[
    "i", "h", "x", "y", "z", "s", "t", "tdg", "v", "vdg", "g", "gdg", "rx", "ry", "rz", "r",
    "cx", "cy", "cz", "ct", "cr", "swap", "ccx",
];

/// Constrói uma porta a partir do nome (sem diferenciar maiúsculas).
///
/// `param` é o ângulo das rotações ou as voltas de `r`/`cr`; `qubits` vale
/// para `i` e para `swap`, que inverte a ordem dos qubits.
pub fn by_name(name: &str, param: Option<f64>, qubits: Option<usize>) -> GateResult<Box<dyn QuantumGate>> {
    let angle = || param.ok_or(GateError::MissingParameter("param"));

    let gate: Box<dyn QuantumGate> = match name.to_ascii_lowercase().as_str() {
        "i" | "id" | "identity" => Box::new(Identity::new(qubits.unwrap_or(1))),
        "h" | "hadamard" => Box::new(Hadamard),
        "x" => Box::new(PauliX),
        "y" => Box::new(PauliY),
        "z" => Box::new(PauliZ),
        "s" => Box::new(SGate),
        "t" => Box::new(TGate),
        "tdg" => Box::new(TDagger),
        "v" => Box::new(VGate),
        "vdg" => Box::new(VDagger),
        "g" => Box::new(GGate),
        "gdg" => Box::new(GDagger),
        "rx" => Box::new(RotationX::new(angle()?)),
        "ry" => Box::new(RotationY::new(angle()?)),
        "rz" => Box::new(RotationZ::new(angle()?)),
        "r" => Box::new(PhaseTurn::new(angle()?)),
        "cx" | "cnot" => Box::new(cx()),
        "cy" => Box::new(cy()),
        "cz" => Box::new(cz()),
        "ct" => Box::new(ct()),
        "cr" => Box::new(crot_z(angle()?)),
        "swap" => {
            let n = qubits.unwrap_or(2);
            Box::new(Permutation::new((0..n).rev().collect())?)
        }
        "ccx" | "toffoli" => Box::new(Toffoli),
        other => return Err(GateError::UnknownGate(other.to_string())),
    };

    Ok(gate)
}
