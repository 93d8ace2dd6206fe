mod common;

use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use densesim::apply::{apply, apply_cnot, apply_operation, apply_single_qubit_gate, apply_to, kron_expand};
use densesim::circuit::{CircuitProgram, cnot, single};
use densesim::error::SimError;
use densesim::gate::Gate;
use densesim::state::StateVector;

use common::{assert_state_approx, basis_state};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

#[test]
fn test_x_gate_on_zero() {
    // X|0> = |1>
    let program = CircuitProgram::new(1, vec![single(Gate::X, 0)]).unwrap();
    let result = apply(&program).unwrap();
    assert_state_approx(&result, &[ZERO, ONE]);
}

#[test]
fn test_h_gate_on_zero() {
    // H|0> = (|0> + |1>) / sqrt(2)
    let program = CircuitProgram::new(1, vec![single(Gate::H, 0)]).unwrap();
    let result = apply(&program).unwrap();
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    assert_state_approx(&result, &[s, s]);
}

#[test]
fn test_bit_flip_big_endian() {
    // X on qubit 0 of |00> gives "10", i.e. index 2
    let program = CircuitProgram::new(2, vec![single(Gate::X, 0)]).unwrap();
    let result = apply(&program).unwrap();
    assert_state_approx(&result, &[ZERO, ZERO, ONE, ZERO]);
    assert_eq!(result.label(2), "10");
}

#[test]
fn test_x_on_last_qubit() {
    let program = CircuitProgram::new(3, vec![single(Gate::X, 2)]).unwrap();
    let result = apply(&program).unwrap();
    assert!((result.probability(1) - 1.0).abs() < 1e-12);
}

#[test]
fn test_y_on_zero() {
    // Y|0> = i|1>
    let program = CircuitProgram::new(1, vec![single(Gate::Y, 0)]).unwrap();
    let result = apply(&program).unwrap();
    assert_state_approx(&result, &[ZERO, Complex64::new(0.0, 1.0)]);
}

#[test]
fn test_phase_gates_on_plus() {
    let s = FRAC_1_SQRT_2;
    let program =
        CircuitProgram::new(1, vec![single(Gate::H, 0), single(Gate::S, 0)]).unwrap();
    let result = apply(&program).unwrap();
    assert_state_approx(&result, &[Complex64::new(s, 0.0), Complex64::new(0.0, s)]);

    let program =
        CircuitProgram::new(1, vec![single(Gate::H, 0), single(Gate::T, 0)]).unwrap();
    let result = apply(&program).unwrap();
    assert_state_approx(
        &result,
        &[Complex64::new(s, 0.0), Complex64::new(0.5, 0.5)],
    );
}

// ============================================================
// Self-inverse gates and gate orders
// ============================================================

fn repeated(gate: Gate, times: usize, num_qubits: usize) -> CircuitProgram {
    CircuitProgram::new(num_qubits, vec![single(gate, 0); times]).unwrap()
}

#[test]
fn test_gate_order_returns_original() {
    for n in 1..=3 {
        let original = StateVector::new(n).unwrap();
        for (gate, times) in [
            (Gate::H, 2),
            (Gate::X, 2),
            (Gate::Y, 2),
            (Gate::Z, 2),
            (Gate::S, 4),
            (Gate::T, 8),
            (Gate::I, 1),
        ] {
            let result = apply(&repeated(gate, times, n)).unwrap();
            assert_state_approx(&result, original.amplitudes().as_slice().unwrap());
        }
    }
}

#[test]
fn test_hh_on_superposed_register() {
    // H(1) then H(0) H(0) leaves H(1)|00>
    let program = CircuitProgram::new(
        2,
        vec![single(Gate::H, 1), single(Gate::H, 0), single(Gate::H, 0)],
    )
    .unwrap();
    let result = apply(&program).unwrap();
    let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
    assert_state_approx(&result, &[s, s, ZERO, ZERO]);
}

// ============================================================
// CNOT
// ============================================================

#[test]
fn test_cnot_truth_table() {
    // control 0, target 1: |00>->|00>, |01>->|01>, |10>->|11>, |11>->|10>
    let expected = [0, 1, 3, 2];
    for (input, &output) in expected.iter().enumerate() {
        let mut state = basis_state(2, input);
        apply_cnot(&mut state, 0, 1).unwrap();
        assert!((state.probability(output) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_cnot_reversed_roles() {
    // control 1, target 0: |01> -> |11>
    let mut state = basis_state(2, 1);
    apply_cnot(&mut state, 1, 0).unwrap();
    assert!((state.probability(3) - 1.0).abs() < 1e-12);
}

#[test]
fn test_cnot_preserves_phase() {
    let amps = vec![
        ZERO,
        ZERO,
        Complex64::new(0.0, FRAC_1_SQRT_2),
        Complex64::new(-FRAC_1_SQRT_2, 0.0),
    ];
    let mut state = StateVector::from_amplitudes(amps.clone()).unwrap();
    apply_cnot(&mut state, 0, 1).unwrap();
    assert_state_approx(&state, &[ZERO, ZERO, amps[3], amps[2]]);
}

#[test]
fn test_cnot_is_involution() {
    let program = CircuitProgram::new(
        3,
        vec![single(Gate::H, 0), single(Gate::T, 0), single(Gate::H, 2), single(Gate::S, 2)],
    )
    .unwrap();
    let before = apply(&program).unwrap();
    let mut state = before.clone();
    apply_cnot(&mut state, 2, 0).unwrap();
    apply_cnot(&mut state, 2, 0).unwrap();
    assert_state_approx(&state, before.amplitudes().as_slice().unwrap());
}

#[test]
fn test_cnot_non_adjacent() {
    // |100> with CNOT(0, 2) -> |101>
    let mut state = basis_state(3, 0b100);
    apply_cnot(&mut state, 0, 2).unwrap();
    assert!((state.probability(0b101) - 1.0).abs() < 1e-12);
}

// ============================================================
// Operator construction
// ============================================================

#[test]
fn test_kron_expand_matches_direct_application() {
    // X on qubit 1 of 3 maps |000> to |010>
    let op = kron_expand(Gate::X, 1, 3).unwrap();
    assert_eq!(op.dim(), (8, 8));
    assert_eq!(op[[0b010, 0b000]], ONE);
    assert_eq!(op[[0b000, 0b000]], ZERO);
}

#[test]
fn test_kron_expand_is_unitary() {
    let op = kron_expand(Gate::H, 1, 3).unwrap();
    let adjoint = op.t().mapv(|z| z.conj());
    let product = adjoint.dot(&op);
    for ((r, c), v) in product.indexed_iter() {
        let expected = if r == c { ONE } else { ZERO };
        assert!((v - expected).norm() < 1e-12);
    }
}

// ============================================================
// Errors
// ============================================================

#[test]
fn test_h_out_of_range() {
    let mut state = StateVector::new(2).unwrap();
    let err = apply_single_qubit_gate(&mut state, Gate::H, 5).unwrap_err();
    assert_eq!(err, SimError::QubitOutOfRange { qubit: 5, num_qubits: 2 });
}

#[test]
fn test_cnot_same_qubit_any_n() {
    for n in 1..=4 {
        let mut state = StateVector::new(n).unwrap();
        let err = apply_cnot(&mut state, 1, 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidOperation(_)), "n = {}", n);
    }
}

#[test]
fn test_cnot_out_of_range() {
    let mut state = StateVector::new(2).unwrap();
    assert!(matches!(
        apply_cnot(&mut state, 0, 2),
        Err(SimError::QubitOutOfRange { qubit: 2, .. })
    ));
    assert!(matches!(
        apply_cnot(&mut state, 3, 0),
        Err(SimError::QubitOutOfRange { qubit: 3, .. })
    ));
}

#[test]
fn test_program_rejects_bad_operation() {
    assert_eq!(
        CircuitProgram::new(2, vec![single(Gate::H, 5)]).unwrap_err(),
        SimError::out_of_range(5, 2)
    );
    assert!(matches!(
        CircuitProgram::new(2, vec![cnot(1, 1)]),
        Err(SimError::InvalidOperation(_))
    ));
}

#[test]
fn test_apply_operation_dispatch() {
    let mut state = StateVector::new(2).unwrap();
    apply_operation(&mut state, &single(Gate::H, 0)).unwrap();
    apply_operation(&mut state, &cnot(0, 1)).unwrap();
    assert!((state.probability(0) - 0.5).abs() < 1e-12);
    assert!((state.probability(3) - 0.5).abs() < 1e-12);
}

#[test]
fn test_fresh_register_per_run() {
    let program = common::bell_program();
    let first = apply(&program).unwrap();
    let second = apply(&program).unwrap();
    assert_eq!(first, second);

    let mut reused = first.clone();
    reused.reset();
    apply_to(&program, &mut reused).unwrap();
    assert_eq!(reused, second);
}
