//! Guided walk through the simulator: tensor products, gate application,
//! the gate catalog and fidelities

use anyhow::Result;
use colored::*;
use qcirc_core::{Operator, QuantumEngine, State};
use qcirc_gates::{
    crot_z, cx, cy, cz, states, Hadamard, Identity, PauliX, PauliY, PauliZ, Permutation, QuantumGate,
};
use rand::Rng;

use crate::render;

fn show_state(label: &str, state: &State) {
    println!("{}", label.cyan().bold());
    print!("{}", render::state(state));
}

fn show_operator(label: &str, op: &Operator) {
    println!("{}", label.cyan().bold());
    print!("{}", render::operator(op));
}

fn show_gate(label: &str, gate: &dyn QuantumGate) -> Result<()> {
    show_operator(label, &gate.operator()?);
    Ok(())
}

pub fn run<R: Rng>(engine: &QuantumEngine, rng: &mut R) -> Result<()> {
    println!("{}", "Tensor products and application".bold());
    let id2 = Identity::new(2).operator()?;
    show_operator("I(2)", &id2);

    let random = states::random(rng)?;
    let one = states::one()?;
    show_state("random", &random);
    show_state("|1⟩", &one);

    let joint = engine.tensor_states(&random, &one)?;
    show_state("random ⊗ |1⟩", &joint);
    let applied = engine.apply(&id2, &joint)?;
    show_state("I(2) · (random ⊗ |1⟩)", &applied);

    let h = Hadamard.operator()?;
    let w = Identity::new(1).operator()?;
    let wh = engine.tensor_operators(&w, &h)?;
    let hw = engine.tensor_operators(&h, &w)?;
    show_operator("H", &h);
    show_operator("I ⊗ H", &wh);
    show_operator("H ⊗ I", &hw);
    show_state("(I ⊗ H) · state", &engine.apply(&wh, &applied)?);

    println!();
    println!("{}", "Gate catalog".bold());
    show_gate("X", &PauliX)?;
    show_gate("Y", &PauliY)?;
    show_gate("Z", &PauliZ)?;
    show_gate("cX", &cx())?;
    show_gate("cY", &cy())?;
    show_gate("cZ", &cz())?;
    for turns in [0.0, 1.0, 0.5, 0.25] {
        show_gate(&format!("cR({turns})"), &crot_z(turns))?;
    }
    show_gate("Swap3 [2, 0, 1]", &Permutation::new(vec![2, 0, 1])?)?;

    println!();
    println!("{}", "Fidelity".bold());
    let a = states::random(rng)?;
    let b = states::random(rng)?;
    show_state("a", &a);
    show_state("b", &b);

    let s2 = engine.tensor_states(&a, &one)?;
    let s3 = engine.tensor_states(&b, &one)?;
    println!("s2, s3: {:.6}", engine.fidelity(&s2, &s3)?.value);
    println!("s3, s2: {:.6}", engine.fidelity(&s3, &s2)?.value);
    println!("s2, s2: {:.6}", engine.fidelity(&s2, &s2)?.value);
    println!("s3, s3: {:.6}", engine.fidelity(&s3, &s3)?.value);

    let s4 = engine.tensor_states(&one, &one)?;
    let s5 = engine.tensor_states(&one, &states::zero()?)?;
    println!("s4, s5: {:.6}", engine.fidelity(&s4, &s5)?.value);

    Ok(())
}
