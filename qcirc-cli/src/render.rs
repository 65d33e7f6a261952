//! Text rendering of states, operators and distributions

use qcirc_core::{Amplitude, Distribution, Operator, State};

/// `(re, imj)` with six decimals
pub fn amplitude(a: Amplitude) -> String {
    format!("({:.6}, {:.6}j)", a.re, a.im)
}

fn row(values: &[Amplitude]) -> String {
    values.iter().map(|&a| amplitude(a)).collect::<Vec<_>>().join("\t")
}

/// One amplitude per line, preceded by the qubit count
pub fn state(state: &State) -> String {
    let lines: String = state
        .amplitudes()
        .iter()
        .map(|&a| format!("{}\n", amplitude(a)))
        .collect();
    format!("{} qubits:\n{}", state.qubits(), lines)
}

/// Row-major matrix, one row per line
pub fn operator(op: &Operator) -> String {
    let rows: String = (0..op.dimension())
        .filter_map(|r| op.row(r))
        .map(|values| format!("{}\n", row(values)))
        .collect();
    format!("{} qubits:\n{}", op.qubits(), rows)
}

/// Outcome bits in qubit order, `-` for qubits never measured
pub fn outcomes(dist: &Distribution, index: usize) -> String {
    let qubits = dist.qubits();
    let Some(branch) = dist.branches().get(index) else {
        return String::new();
    };
    (0..qubits)
        .map(|q| branch.outcome(q).map_or_else(|| "-".to_string(), |b| b.to_string()))
        .collect()
}

pub fn distribution(dist: &Distribution) -> String {
    dist.iter()
        .enumerate()
        .map(|(i, branch)| {
            format!(
                "[{}] p = {:.6}\n{}\n",
                outcomes(dist, i),
                branch.probability(),
                state(branch.state())
            )
        })
        .collect()
}
