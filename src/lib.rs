//! # densesim
//!
//! Dense state-vector simulation of small quantum circuits over the gate set
//! {I, X, Y, Z, H, S, T, CNOT}, with shot sampling and diagnostics
//! (qubit-0 entanglement entropy, a purity proxy and a total-probability check).
//!
//! Basis labels are big-endian: qubit 0 is the leftmost character.
//!
//! ```
//! use densesim::{apply, cnot, single, CircuitProgram, Gate};
//! use densesim::diagnostics::probability_map;
//!
//! let program = CircuitProgram::new(2, vec![single(Gate::H, 0), cnot(0, 1)]).unwrap();
//! let state = apply(&program).unwrap();
//! let probs = probability_map(&state);
//! assert!((probs["00"] - 0.5).abs() < 1e-9);
//! assert!((probs["11"] - 0.5).abs() < 1e-9);
//! ```

pub mod apply;
pub mod circuit;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod index;
pub mod json;
pub mod measure;
pub mod simulation;
pub mod state;
pub mod templates;

pub use apply::apply;
pub use circuit::{CircuitProgram, GateOperation, cnot, single};
pub use diagnostics::Diagnostics;
pub use error::{Result, SimError};
pub use gate::Gate;
pub use measure::MeasurementHistogram;
pub use simulation::{SimulationConfig, SimulationResult, Simulator, simulate};
pub use state::StateVector;
