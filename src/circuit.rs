use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::gate::Gate;

/// A single gate placed on the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOperation {
    SingleQubit { gate: Gate, qubit: usize },
    ControlledNot { control: usize, target: usize },
}

impl GateOperation {
    /// All qubit indices the operation touches.
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            GateOperation::SingleQubit { qubit, .. } => vec![qubit],
            GateOperation::ControlledNot { control, target } => vec![control, target],
        }
    }

    /// Largest qubit index the operation touches.
    pub fn max_qubit(&self) -> usize {
        match *self {
            GateOperation::SingleQubit { qubit, .. } => qubit,
            GateOperation::ControlledNot { control, target } => control.max(target),
        }
    }

    /// Check indices against an `num_qubits`-qubit register.
    ///
    /// # Errors
    /// `QubitOutOfRange` for an index outside `[0, num_qubits)`;
    /// `InvalidOperation` for a CNOT whose control equals its target.
    pub fn validate(&self, num_qubits: usize) -> Result<()> {
        match *self {
            GateOperation::SingleQubit { qubit, .. } => check_qubit(qubit, num_qubits),
            GateOperation::ControlledNot { control, target } => {
                if control == target {
                    return Err(SimError::invalid_operation(format!(
                        "CNOT control and target must differ (both are {})",
                        control
                    )));
                }
                check_qubit(control, num_qubits)?;
                check_qubit(target, num_qubits)
            }
        }
    }
}

pub(crate) fn check_qubit(qubit: usize, num_qubits: usize) -> Result<()> {
    if qubit >= num_qubits {
        return Err(SimError::out_of_range(qubit, num_qubits));
    }
    Ok(())
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOperation::SingleQubit { gate, qubit } => write!(f, "{} @ q[{}]", gate, qubit),
            GateOperation::ControlledNot { control, target } => {
                write!(f, "C(q[{}]) X @ q[{}]", control, target)
            }
        }
    }
}

/// Place a single-qubit gate.
///
/// # Example
/// ```
/// use densesim::circuit::{single, GateOperation};
/// use densesim::gate::Gate;
/// assert_eq!(single(Gate::H, 0), GateOperation::SingleQubit { gate: Gate::H, qubit: 0 });
/// ```
pub fn single(gate: Gate, qubit: usize) -> GateOperation {
    GateOperation::SingleQubit { gate, qubit }
}

/// Place a CNOT gate.
pub fn cnot(control: usize, target: usize) -> GateOperation {
    GateOperation::ControlledNot { control, target }
}

/// An ordered gate list on a register of fixed size.
///
/// Built by the caller, then borrowed by the simulator for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedProgram")]
pub struct CircuitProgram {
    num_qubits: usize,
    operations: Vec<GateOperation>,
}

/// Deserialized form, validated through [`CircuitProgram::new`].
#[derive(Deserialize)]
struct UncheckedProgram {
    num_qubits: usize,
    operations: Vec<GateOperation>,
}

impl TryFrom<UncheckedProgram> for CircuitProgram {
    type Error = SimError;

    fn try_from(raw: UncheckedProgram) -> Result<Self> {
        CircuitProgram::new(raw.num_qubits, raw.operations)
    }
}

impl CircuitProgram {
    /// Creates a program with validation.
    ///
    /// # Errors
    /// `InvalidQubitCount` if `num_qubits == 0`, otherwise the first error
    /// reported by [`GateOperation::validate`].
    pub fn new(num_qubits: usize, operations: Vec<GateOperation>) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SimError::InvalidQubitCount(num_qubits));
        }
        for op in &operations {
            op.validate(num_qubits)?;
        }
        Ok(CircuitProgram {
            num_qubits,
            operations,
        })
    }

    /// Creates a program sized by [`CircuitProgram::infer_num_qubits`].
    pub fn inferred(operations: Vec<GateOperation>) -> Result<Self> {
        let n = Self::infer_num_qubits(&operations);
        Self::new(n, operations)
    }

    /// Register size implied by an operation list: one past the highest
    /// index used, and never fewer than two qubits.
    pub fn infer_num_qubits(operations: &[GateOperation]) -> usize {
        operations
            .iter()
            .map(|op| op.max_qubit().saturating_add(1))
            .max()
            .unwrap_or(0)
            .max(2)
    }

    /// Append an operation, validating it against the register.
    pub fn push(&mut self, op: GateOperation) -> Result<()> {
        op.validate(self.num_qubits)?;
        self.operations.push(op);
        Ok(())
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn operations(&self) -> &[GateOperation] {
        &self.operations
    }

    /// Number of operations; each one counts as a layer.
    pub fn depth(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Sorted, de-duplicated qubit indices touched by the program.
    pub fn qubits_used(&self) -> Vec<usize> {
        let mut qubits: Vec<usize> = self.operations.iter().flat_map(|op| op.qubits()).collect();
        qubits.sort_unstable();
        qubits.dedup();
        qubits
    }
}

impl fmt::Display for CircuitProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nqubits: {}", self.num_qubits)?;
        for op in &self.operations {
            writeln!(f, "  {}", op)?;
        }
        Ok(())
    }
}
