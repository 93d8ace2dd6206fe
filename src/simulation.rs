//! End-to-end simulation pipeline.
//!
//! A run creates a fresh register, applies the program in order, samples
//! measurement shots and computes diagnostics:
//!
//! ```text
//! Reset -> (ApplyGate)* -> Measure / Diagnose
//! ```
//!
//! # Usage
//!
//! ```
//! use densesim::circuit::{cnot, single, CircuitProgram};
//! use densesim::gate::Gate;
//! use densesim::simulation::{SimulationConfig, Simulator};
//!
//! let program = CircuitProgram::new(2, vec![single(Gate::H, 0), cnot(0, 1)]).unwrap();
//! let simulator = Simulator::new(SimulationConfig::default().with_seed(7)).unwrap();
//! let result = simulator.run(&program).unwrap();
//!
//! assert_eq!(result.counts.total_shots(), 1024);
//! assert!((result.diagnostics.entanglement_entropy - 1.0).abs() < 1e-9);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::apply::{TraceStep, apply, apply_with_trace};
use crate::circuit::{CircuitProgram, GateOperation};
use crate::diagnostics::Diagnostics;
use crate::error::{Result, SimError};
use crate::measure::{MeasurementHistogram, sample};
use crate::state::StateSnapshot;

/// Shots drawn when the caller does not ask for a specific number.
pub const DEFAULT_SHOTS: usize = 1024;

/// Largest register the pipeline accepts by default.
///
/// Each single-qubit gate materializes a 2^n x 2^n complex operator, so
/// 12 qubits already needs 256 MiB per gate.
pub const DEFAULT_MAX_QUBITS: usize = 12;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of measurement shots, must be > 0.
    pub shots: usize,
    /// Upper bound on the register size.
    pub max_qubits: usize,
    /// Seed for the sampling generator; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Record the probability vector after every operation.
    pub record_trace: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
            record_trace: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(SimError::InvalidShots(self.shots));
        }
        if self.max_qubits == 0 {
            return Err(SimError::InvalidQubitCount(self.max_qubits));
        }
        Ok(())
    }

    /// Generator for one run: seeded if a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Summary of the executed program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitInfo {
    pub num_qubits: usize,
    pub depth: usize,
    pub total_shots: usize,
    pub operations: Vec<GateOperation>,
}

/// Everything one run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub counts: MeasurementHistogram,
    pub diagnostics: Diagnostics,
    pub state: StateSnapshot,
    pub circuit: CircuitInfo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trace: Vec<TraceStep>,
}

/// Run `program` once, sampling with `rng`.
///
/// # Errors
/// Configuration errors, `TooManyQubits` above `config.max_qubits`, and any
/// structural error from the gate applicator. No partial result is returned.
pub fn simulate(
    program: &CircuitProgram,
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<SimulationResult> {
    config.validate()?;
    let n = program.num_qubits();
    if n > config.max_qubits {
        return Err(SimError::TooManyQubits {
            requested: n,
            max: config.max_qubits,
        });
    }

    let (state, trace) = if config.record_trace {
        apply_with_trace(program)?
    } else {
        (apply(program)?, Vec::new())
    };

    let counts = sample(&state, config.shots, rng)?;
    let diagnostics = Diagnostics::compute(&state);

    info!(
        num_qubits = n,
        depth = program.depth(),
        shots = config.shots,
        entropy = diagnostics.entanglement_entropy,
        "simulation complete"
    );

    Ok(SimulationResult {
        counts,
        state: state.snapshot(),
        circuit: CircuitInfo {
            num_qubits: n,
            depth: program.depth(),
            total_shots: config.shots,
            operations: program.operations().to_vec(),
        },
        diagnostics,
        trace,
    })
}

/// Run `program` with the generator described by `config`.
pub fn simulate_seeded(program: &CircuitProgram, config: &SimulationConfig) -> Result<SimulationResult> {
    let mut rng = config.rng();
    simulate(program, config, &mut rng)
}

/// Reusable front end holding a validated configuration.
///
/// Holds no register; every call to [`Simulator::run`] starts from a new one.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Simulator { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run with a generator derived from the configuration.
    pub fn run(&self, program: &CircuitProgram) -> Result<SimulationResult> {
        simulate_seeded(program, &self.config)
    }

    /// Run with a caller-supplied generator.
    pub fn run_with_rng(&self, program: &CircuitProgram, rng: &mut impl Rng) -> Result<SimulationResult> {
        simulate(program, &self.config, rng)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Simulator {
            config: SimulationConfig::default(),
        }
    }
}
