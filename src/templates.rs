//! Catalogue of small named circuits with their ideal outcome distributions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::circuit::{CircuitProgram, cnot, single};
use crate::error::{Result, SimError};
use crate::gate::Gate;

/// Names accepted by [`template`], in catalogue order.
pub const TEMPLATE_NAMES: [&str; 4] = ["bell", "grover", "ghz", "superposition"];

/// A named circuit and the probability map it should produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Ideal final state in ket notation.
    pub theory: &'static str,
    pub program: CircuitProgram,
    /// Label -> probability of the ideal final state.
    pub expected: BTreeMap<String, f64>,
}

fn distribution(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|&(label, p)| (label.to_string(), p)).collect()
}

/// H(0), CNOT(0, 1): (|00> + |11>)/sqrt(2).
pub fn bell_circuit() -> Result<CircuitProgram> {
    CircuitProgram::new(2, vec![single(Gate::H, 0), cnot(0, 1)])
}

/// H(0), CNOT(0, 1), CNOT(1, 2): (|000> + |111>)/sqrt(2).
pub fn ghz_circuit() -> Result<CircuitProgram> {
    CircuitProgram::new(3, vec![single(Gate::H, 0), cnot(0, 1), cnot(1, 2)])
}

/// Two-qubit search skeleton: uniform superposition, Z phase marks, CNOT.
///
/// The phases cancel in the measurement basis, so all four outcomes stay
/// equally likely.
pub fn grover_circuit() -> Result<CircuitProgram> {
    CircuitProgram::new(
        2,
        vec![
            single(Gate::H, 0),
            single(Gate::H, 1),
            single(Gate::Z, 0),
            single(Gate::Z, 1),
            cnot(0, 1),
        ],
    )
}

/// H on a single qubit: (|0> + |1>)/sqrt(2).
pub fn superposition_circuit() -> Result<CircuitProgram> {
    CircuitProgram::new(1, vec![single(Gate::H, 0)])
}

/// Look up a template by name.
///
/// # Errors
/// `UnknownTemplate` if `name` is not in [`TEMPLATE_NAMES`].
pub fn template(name: &str) -> Result<Template> {
    let t = match name {
        "bell" => Template {
            name: "bell",
            title: "Bell state",
            description: "Maximal entanglement between two qubits",
            theory: "|Φ+> = (|00> + |11>)/√2",
            program: bell_circuit()?,
            expected: distribution(&[("00", 0.5), ("11", 0.5)]),
        },
        "grover" => Template {
            name: "grover",
            title: "Grover search (2 qubits)",
            description: "Unstructured search over a four-element space",
            theory: "O(√N) oracle queries instead of O(N)",
            program: grover_circuit()?,
            expected: distribution(&[("00", 0.25), ("01", 0.25), ("10", 0.25), ("11", 0.25)]),
        },
        "ghz" => Template {
            name: "ghz",
            title: "GHZ state",
            description: "Maximal entanglement across three qubits",
            theory: "|GHZ> = (|000> + |111>)/√2",
            program: ghz_circuit()?,
            expected: distribution(&[("000", 0.5), ("111", 0.5)]),
        },
        "superposition" => Template {
            name: "superposition",
            title: "Superposition",
            description: "Equal superposition of a single qubit",
            theory: "|+> = (|0> + |1>)/√2",
            program: superposition_circuit()?,
            expected: distribution(&[("0", 0.5), ("1", 0.5)]),
        },
        other => return Err(SimError::UnknownTemplate(other.to_string())),
    };
    Ok(t)
}

/// Every template, in catalogue order.
pub fn all_templates() -> Result<Vec<Template>> {
    TEMPLATE_NAMES.iter().map(|name| template(name)).collect()
}
