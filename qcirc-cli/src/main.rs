//! qcirc - Dense Quantum Circuit Simulator
//! Command-line driver for building, applying and measuring small circuits

mod demo;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use qcirc_core::{Distribution, QuantumEngine, SimConfig, State};
use qcirc_gates::{by_name, lift, Hadamard, GATE_NAMES};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "qcirc")]
#[command(author = "qcirc Contributors")]
#[command(version = "2026.1.16")]
#[command(about = "qcirc - dense quantum circuit simulator", long_about = None)]
struct Cli {
    /// Simulator configuration file (TOML); defaults to QCIRC_* environment variables
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log filter (e.g. "info", "qcirc_core=debug"); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through tensor products, the gate catalog and fidelities
    Demo {
        /// Seed for the random states
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print a gate from the catalog
    Gate {
        /// Gate name (see `qcirc info`)
        #[arg(value_name = "NAME")]
        name: String,

        /// Rotation angle, or turns for r/cr
        #[arg(short, long, allow_hyphen_values = true)]
        param: Option<f64>,

        /// Register size for i and swap
        #[arg(short, long)]
        qubits: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Prepare a basis state, apply Hadamards and measure qubits in sequence
    Measure {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Like measure, then collapse to a single outcome
    Sample {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Seed for the outcome draw
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show information about qcirc
    Info,
}

#[derive(clap::Args)]
struct CircuitArgs {
    /// Initial basis state, qubit 0 first (e.g. "010")
    #[arg(value_name = "BITS")]
    bits: String,

    /// Apply a Hadamard to this qubit before measuring (repeatable)
    #[arg(long = "hadamard", value_name = "Q")]
    hadamards: Vec<usize>,

    /// Qubit to measure, in order (repeatable)
    #[arg(short, long = "qubit", value_name = "Q", required = true)]
    qubits: Vec<usize>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    if let Err(e) = dispatch(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| "qcirc=info".into()),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Demo { seed } => demo::run(&load_engine(config)?, &mut rng(seed)),
        Commands::Gate { name, param, qubits, json } => gate_command(&name, param, qubits, json),
        Commands::Measure { circuit, json } => measure_command(&load_engine(config)?, &circuit, json),
        Commands::Sample { circuit, seed } => sample_command(&load_engine(config)?, &circuit, seed),
        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}

fn load_engine(path: Option<&Path>) -> Result<QuantumEngine> {
    let config = match path {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimConfig::from_env().context("invalid QCIRC_* environment configuration")?,
    };
    tracing::debug!(?config, "simulator configuration");
    Ok(QuantumEngine::with_config(config)?)
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

// ============================================================================
// Circuit commands
// ============================================================================

fn parse_bits(bits: &str) -> Result<Vec<u8>> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => bail!("invalid bit '{}' in '{}'", other, bits),
        })
        .collect()
}

/// Basis state with the requested Hadamards applied
fn prepare(engine: &QuantumEngine, circuit: &CircuitArgs) -> Result<State> {
    let bits = parse_bits(&circuit.bits)?;
    if bits.is_empty() {
        bail!("BITS must name at least one qubit");
    }
    if bits.len() > engine.config().max_qubits {
        bail!(
            "{} qubits exceeds the configured max_qubits ({})",
            bits.len(),
            engine.config().max_qubits
        );
    }
    let mut state = State::from_bits(&bits)?;

    for &qubit in &circuit.hadamards {
        let layer = lift(&Hadamard, qubit, state.qubits())?;
        state = engine.apply(&layer, &state)?;
    }
    Ok(state)
}

fn measure_circuit(engine: &QuantumEngine, circuit: &CircuitArgs) -> Result<Distribution> {
    let state = prepare(engine, circuit)?;
    let checked = engine.measure_sequence(&state, &circuit.qubits)?;
    for warning in &checked.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    Ok(checked.into_value())
}

fn gate_command(name: &str, param: Option<f64>, qubits: Option<usize>, json: bool) -> Result<()> {
    let gate = by_name(name, param, qubits)?;
    let op = gate.operator()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&op)?);
    } else {
        println!("{} {}", "Gate".green().bold(), gate.name().cyan());
        print!("{}", render::operator(&op));
    }
    Ok(())
}

fn measure_command(engine: &QuantumEngine, circuit: &CircuitArgs, json: bool) -> Result<()> {
    let dist = measure_circuit(engine, circuit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dist)?);
    } else {
        println!(
            "{} {} branch(es), total p = {:.6}",
            "Distribution".green().bold(),
            dist.len(),
            dist.total_probability()
        );
        print!("{}", render::distribution(&dist));
    }
    Ok(())
}

fn sample_command(engine: &QuantumEngine, circuit: &CircuitArgs, seed: Option<u64>) -> Result<()> {
    let dist = measure_circuit(engine, circuit)?;
    let branch = dist.sample(&mut rng(seed));

    let outcome: String = circuit
        .qubits
        .iter()
        .filter_map(|&q| branch.outcome(q))
        .map(|b| b.to_string())
        .collect();
    println!(
        "{} {} (p = {:.6})",
        "Outcome".green().bold(),
        outcome.cyan(),
        branch.probability()
    );
    print!("{}", render::state(branch.state()));
    Ok(())
}

// ============================================================================
// Info
// ============================================================================

fn print_info() {
    println!("{}", "qcirc - Dense Quantum Circuit Simulator".bold());
    println!();
    println!("Pure states and linear operators on small registers, stored densely.");
    println!();
    println!("{}", "Conventions:".bold());
    println!("  • Qubit 0 is the most significant bit of a basis index");
    println!("  • In a ⊗ b, a occupies the high-order qubits");
    println!("  • Controlled gates use qubit 0 as control");
    println!();
    println!("{}", "Gates:".bold());
    println!("  {}", GATE_NAMES.join(" "));
    println!();
    println!("{}", "Commands:".bold());
    println!("  qcirc demo --seed 7                     # Guided demonstration");
    println!("  qcirc gate h                            # Print a gate");
    println!("  qcirc gate rz --param 1.5708            # Parameterized gate");
    println!("  qcirc gate swap --qubits 3              # Reverse qubit order");
    println!("  qcirc measure 00 --hadamard 0 -q 0 -q 1 # Measurement distribution");
    println!("  qcirc sample 00 --hadamard 0 -q 0 -s 1  # Seeded single outcome");
    println!();
    println!("{}", "Configuration:".bold());
    println!("  --config sim.toml or QCIRC_TOLERANCE, QCIRC_MAX_QUBITS, QCIRC_NORMALIZATION,");
    println!("  QCIRC_STRICT_NORMALIZATION, QCIRC_MERGE_BRANCHES");
    println!("  --log-level debug or RUST_LOG for tracing output");
}
