//! Gate application on a dense state vector.
//!
//! Single-qubit gates are expanded to the full 2^n x 2^n operator
//! `M_0 ⊗ M_1 ⊗ ... ⊗ M_{n-1}` (qubit 0 leftmost) and multiplied into the
//! amplitude vector. This costs O(4^n) time and memory per gate.
//! CNOT is applied as a basis permutation into a fresh buffer.

use ndarray::linalg::kron;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::{CircuitProgram, GateOperation, check_qubit};
use crate::error::{Result, SimError};
use crate::gate::Gate;
use crate::index::{flip_qubit, qubit_bit};
use crate::state::{MAX_REGISTER_QUBITS, StateVector};

/// Largest register whose full 2^n x 2^n operator is addressable.
pub const MAX_OPERATOR_QUBITS: usize = MAX_REGISTER_QUBITS / 2;

/// Build the full-register operator for `gate` acting on `qubit`.
///
/// Position `qubit` of the Kronecker product holds the gate matrix, every
/// other position holds the identity.
///
/// # Example
/// ```
/// use densesim::apply::kron_expand;
/// use densesim::gate::Gate;
/// let op = kron_expand(Gate::X, 0, 2).unwrap();
/// assert_eq!(op.dim(), (4, 4));
/// // X on qubit 0 maps |00> (index 0) to |10> (index 2)
/// assert_eq!(op[[2, 0]].re, 1.0);
/// ```
pub fn kron_expand(gate: Gate, qubit: usize, num_qubits: usize) -> Result<Array2<Complex64>> {
    if num_qubits == 0 {
        return Err(SimError::InvalidQubitCount(num_qubits));
    }
    check_qubit(qubit, num_qubits)?;
    if num_qubits > MAX_OPERATOR_QUBITS {
        return Err(SimError::TooManyQubits {
            requested: num_qubits,
            max: MAX_OPERATOR_QUBITS,
        });
    }

    let factor = |q: usize| {
        if q == qubit {
            gate.matrix()
        } else {
            Gate::I.matrix()
        }
    };

    let mut full = factor(0).clone();
    for q in 1..num_qubits {
        full = kron(&full, factor(q));
    }
    Ok(full)
}

/// Apply a single-qubit gate by multiplying the expanded operator into the state.
///
/// # Errors
/// `QubitOutOfRange` if `qubit >= state.num_qubits()`.
pub fn apply_single_qubit_gate(state: &mut StateVector, gate: Gate, qubit: usize) -> Result<()> {
    let operator = kron_expand(gate, qubit, state.num_qubits())?;
    let next = operator.dot(state.amplitudes());
    state.replace_data(next);
    Ok(())
}

/// Apply CNOT: for each basis index with the control bit set, route its
/// amplitude to the index with the target bit flipped.
///
/// Amplitudes are written into a new buffer and swapped in afterwards, so
/// every amplitude is routed exactly once.
///
/// # Errors
/// `InvalidOperation` if `control == target`; `QubitOutOfRange` if either
/// index is outside the register.
pub fn apply_cnot(state: &mut StateVector, control: usize, target: usize) -> Result<()> {
    let n = state.num_qubits();
    GateOperation::ControlledNot { control, target }.validate(n)?;

    let input = state.amplitudes();
    let mut output = Array1::zeros(input.len());
    for (i, &amp) in input.iter().enumerate() {
        let dest = if qubit_bit(i, control, n) == 1 {
            flip_qubit(i, target, n)
        } else {
            i
        };
        output[dest] = amp;
    }
    state.replace_data(output);
    Ok(())
}

/// Apply one operation of a program.
pub fn apply_operation(state: &mut StateVector, op: &GateOperation) -> Result<()> {
    debug!(operation = %op, num_qubits = state.num_qubits(), "applying gate");
    match *op {
        GateOperation::SingleQubit { gate, qubit } => apply_single_qubit_gate(state, gate, qubit),
        GateOperation::ControlledNot { control, target } => apply_cnot(state, control, target),
    }
}

/// Apply every operation of `program` to `state`, in program order.
///
/// Stops at the first failing operation; the state is then left partially
/// evolved and should be discarded.
pub fn apply_to(program: &CircuitProgram, state: &mut StateVector) -> Result<()> {
    if state.num_qubits() != program.num_qubits() {
        return Err(SimError::invalid_operation(format!(
            "program expects {} qubits, register has {}",
            program.num_qubits(),
            state.num_qubits()
        )));
    }
    for op in program.operations() {
        apply_operation(state, op)?;
    }
    Ok(())
}

/// Run `program` on a freshly created |0...0> register.
pub fn apply(program: &CircuitProgram) -> Result<StateVector> {
    let mut state = StateVector::new(program.num_qubits())?;
    apply_to(program, &mut state)?;
    Ok(state)
}

/// State after one operation of a traced run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// 1-based position in the program.
    pub step: usize,
    pub operation: String,
    /// |amplitude_i|^2 for every basis index.
    pub probabilities: Vec<f64>,
}

/// Like [`apply`], but records the probability vector after every operation.
pub fn apply_with_trace(program: &CircuitProgram) -> Result<(StateVector, Vec<TraceStep>)> {
    let mut state = StateVector::new(program.num_qubits())?;
    let mut trace = Vec::with_capacity(program.depth());
    for (i, op) in program.operations().iter().enumerate() {
        apply_operation(&mut state, op)?;
        trace.push(TraceStep {
            step: i + 1,
            operation: op.to_string(),
            probabilities: state.amplitudes().iter().map(|a| a.norm_sqr()).collect(),
        });
    }
    Ok((state, trace))
}
