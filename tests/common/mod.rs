//! Shared test utilities for densesim integration tests.

use num_complex::Complex64;

use densesim::circuit::{CircuitProgram, cnot, single};
use densesim::gate::Gate;
use densesim::state::StateVector;

pub const ATOL: f64 = 1e-10;

/// H(0), CNOT(0, 1) on two qubits.
#[allow(dead_code)]
pub fn bell_program() -> CircuitProgram {
    CircuitProgram::new(2, vec![single(Gate::H, 0), cnot(0, 1)]).unwrap()
}

/// H(0), CNOT(0, 1), CNOT(1, 2) on three qubits.
#[allow(dead_code)]
pub fn ghz_program() -> CircuitProgram {
    CircuitProgram::new(3, vec![single(Gate::H, 0), cnot(0, 1), cnot(1, 2)]).unwrap()
}

#[allow(dead_code)]
pub fn assert_state_approx(result: &StateVector, expected: &[Complex64]) {
    assert_eq!(result.dim(), expected.len());
    for (i, (r, e)) in result.amplitudes().iter().zip(expected.iter()).enumerate() {
        assert!(
            (r - e).norm() < ATOL,
            "State mismatch at index {}: got {:?}, expected {:?}",
            i,
            r,
            e
        );
    }
}

/// Basis state |index> on `num_qubits` qubits.
#[allow(dead_code)]
pub fn basis_state(num_qubits: usize, index: usize) -> StateVector {
    let dim = StateVector::new(num_qubits).unwrap().dim();
    let mut amps = vec![Complex64::new(0.0, 0.0); dim];
    amps[index] = Complex64::new(1.0, 0.0);
    StateVector::from_amplitudes(amps).unwrap()
}
