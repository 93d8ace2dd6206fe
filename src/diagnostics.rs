//! Quantum-information diagnostics of a final state.
//!
//! The entanglement measure is the von Neumann entropy of the reduced
//! density matrix of qubit 0 alone. It quantifies how entangled qubit 0 is
//! with the rest of the register; it is not a global multi-qubit measure and
//! reads 0 for entanglement that does not involve qubit 0.
//!
//! `purity` (Σ|a|^4) and `total_probability` (Σ|a|^2) keep the simplified
//! formulas of the engine they were taken from. Neither is the textbook
//! purity or fidelity of a mixed or reference-compared state.

use std::collections::BTreeMap;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::index::{basis_label, qubit_bit, without_qubit};
use crate::state::StateVector;

/// Probabilities at or below this are dropped from the probability map.
pub const PROBABILITY_CUTOFF: f64 = 1e-10;

/// Eigenvalues at or below this are skipped in the entropy sum.
pub const EIGENVALUE_CUTOFF: f64 = 1e-12;

/// Probabilities at or below this are skipped in the measurement entropy.
pub const ENTROPY_CUTOFF: f64 = 1e-12;

/// Allowed drift of the total probability from 1.
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Label -> probability for every basis state with probability above
/// [`PROBABILITY_CUTOFF`].
pub fn probability_map(state: &StateVector) -> BTreeMap<String, f64> {
    let n = state.num_qubits();
    state
        .amplitudes()
        .iter()
        .enumerate()
        .map(|(i, a)| (i, a.norm_sqr()))
        .filter(|&(_, p)| p > PROBABILITY_CUTOFF)
        .map(|(i, p)| (basis_label(i, n), p))
        .collect()
}

/// 2x2 reduced density matrix of qubit 0.
///
/// For each pair of basis indices (i, j) that agree on every qubit except
/// qubit 0, accumulates `rho[bit0(i)][bit0(j)] += a_i * conj(a_j)`.
pub fn reduced_density_matrix_qubit0(state: &StateVector) -> Array2<Complex64> {
    let n = state.num_qubits();
    let amps = state.amplitudes();
    let mut rho = Array2::zeros((2, 2));
    for (i, &ai) in amps.iter().enumerate() {
        let rest_i = without_qubit(i, 0, n);
        let bi = qubit_bit(i, 0, n);
        for (j, &aj) in amps.iter().enumerate() {
            if without_qubit(j, 0, n) == rest_i {
                rho[[bi, qubit_bit(j, 0, n)]] += ai * aj.conj();
            }
        }
    }
    rho
}

/// Eigenvalues of a 2x2 Hermitian matrix, ascending.
///
/// Returns `None` if the input is not 2x2 or the result is not finite.
pub fn hermitian_eigenvalues_2x2(m: &Array2<Complex64>) -> Option<[f64; 2]> {
    if m.dim() != (2, 2) {
        return None;
    }
    let a = m[[0, 0]].re;
    let d = m[[1, 1]].re;
    let b = m[[0, 1]];
    let mean = 0.5 * (a + d);
    let radius = (0.25 * (a - d) * (a - d) + b.norm_sqr()).sqrt();
    let eig = [mean - radius, mean + radius];
    eig.iter().all(|x| x.is_finite()).then_some(eig)
}

/// Von Neumann entropy (bits) of qubit 0 with respect to the rest.
///
/// Zero for single-qubit registers. Degrades to 0.0 if the eigenvalues
/// cannot be computed.
pub fn entanglement_entropy(state: &StateVector) -> f64 {
    if state.num_qubits() < 2 {
        return 0.0;
    }
    let rho = reduced_density_matrix_qubit0(state);
    let Some(eigenvalues) = hermitian_eigenvalues_2x2(&rho) else {
        warn!("reduced density matrix eigenvalues not finite, entropy set to 0");
        return 0.0;
    };
    let entropy: f64 = eigenvalues
        .iter()
        .filter(|&&l| l > EIGENVALUE_CUTOFF)
        .map(|&l| -l * l.log2())
        .sum();
    if entropy.is_finite() {
        // -0.0 for pure states
        entropy.max(0.0)
    } else {
        warn!(entropy, "entanglement entropy not finite, set to 0");
        0.0
    }
}

/// Σ|a_i|^4.
pub fn purity(state: &StateVector) -> f64 {
    state
        .amplitudes()
        .iter()
        .map(|a| {
            let p = a.norm_sqr();
            p * p
        })
        .sum()
}

/// Σ|a_i|^2; should be 1 within [`NORMALIZATION_TOLERANCE`].
pub fn total_probability(state: &StateVector) -> f64 {
    state.total_probability()
}

/// Shannon entropy (bits) of a probability map, skipping entries at or
/// below [`ENTROPY_CUTOFF`].
pub fn shannon_entropy(probabilities: &BTreeMap<String, f64>) -> f64 {
    let h: f64 = probabilities
        .values()
        .filter(|&&p| p > ENTROPY_CUTOFF)
        .map(|&p| -p * p.log2())
        .sum();
    h.max(0.0)
}

/// All diagnostics of one final state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub probabilities: BTreeMap<String, f64>,
    pub entanglement_entropy: f64,
    pub purity: f64,
    /// Reported as "fidelity" by older front ends.
    pub total_probability: f64,
    /// Shannon entropy of `probabilities`.
    pub measurement_entropy: f64,
}

impl Diagnostics {
    pub fn compute(state: &StateVector) -> Self {
        let probabilities = probability_map(state);
        let total = total_probability(state);
        if (total - 1.0).abs() > NORMALIZATION_TOLERANCE {
            warn!(total, "total probability drifted from 1");
        }
        let measurement_entropy = shannon_entropy(&probabilities);
        Diagnostics {
            entanglement_entropy: entanglement_entropy(state),
            purity: purity(state),
            total_probability: total,
            measurement_entropy,
            probabilities,
        }
    }

    pub fn is_normalized(&self) -> bool {
        (self.total_probability - 1.0).abs() <= NORMALIZATION_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_eigenvalues_diagonal() {
        let m = ndarray::array![[c(0.25, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.75, 0.0)]];
        let [lo, hi] = hermitian_eigenvalues_2x2(&m).unwrap();
        assert!((lo - 0.25).abs() < 1e-12);
        assert!((hi - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvalues_pure_plus_state() {
        // |+><+| has eigenvalues 0 and 1
        let m = ndarray::array![[c(0.5, 0.0), c(0.5, 0.0)], [c(0.5, 0.0), c(0.5, 0.0)]];
        let [lo, hi] = hermitian_eigenvalues_2x2(&m).unwrap();
        assert!(lo.abs() < 1e-12);
        assert!((hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvalues_wrong_shape() {
        let m: Array2<Complex64> = Array2::zeros((3, 3));
        assert!(hermitian_eigenvalues_2x2(&m).is_none());
    }

    #[test]
    fn test_entropy_product_state_is_zero() {
        // |+>|0>
        let s = FRAC_1_SQRT_2;
        let zero = c(0.0, 0.0);
        let state = StateVector::from_amplitudes(vec![c(s, 0.0), zero, c(s, 0.0), zero]).unwrap();
        assert!(entanglement_entropy(&state).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_bell_state_is_one() {
        let s = FRAC_1_SQRT_2;
        let zero = c(0.0, 0.0);
        let state = StateVector::from_amplitudes(vec![c(s, 0.0), zero, zero, c(s, 0.0)]).unwrap();
        assert!((entanglement_entropy(&state) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_entropy_single_qubit_is_zero() {
        let s = FRAC_1_SQRT_2;
        let state = StateVector::from_amplitudes(vec![c(s, 0.0), c(s, 0.0)]).unwrap();
        assert_eq!(entanglement_entropy(&state), 0.0);
    }

    #[test]
    fn test_reduced_density_matrix_trace_one() {
        let s = FRAC_1_SQRT_2;
        let zero = c(0.0, 0.0);
        let state = StateVector::from_amplitudes(vec![c(s, 0.0), zero, zero, c(0.0, s)]).unwrap();
        let rho = reduced_density_matrix_qubit0(&state);
        assert!(((rho[[0, 0]] + rho[[1, 1]]) - c(1.0, 0.0)).norm() < 1e-12);
        assert!(rho[[0, 1]].norm() < 1e-12);
    }

    #[test]
    fn test_probability_map_cutoff() {
        let tiny: f64 = 1e-6; // p = 1e-12, below the cutoff
        let big = (1.0 - tiny * tiny).sqrt();
        let state = StateVector::from_amplitudes(vec![c(big, 0.0), c(tiny, 0.0)]).unwrap();
        let map = probability_map(&state);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("0"));
    }

    #[test]
    fn test_purity_and_total() {
        let s = FRAC_1_SQRT_2;
        let state = StateVector::from_amplitudes(vec![c(s, 0.0), c(0.0, s)]).unwrap();
        assert!((purity(&state) - 0.5).abs() < 1e-12);
        assert!((total_probability(&state) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_shannon_entropy() {
        let mut map = BTreeMap::new();
        map.insert("00".to_string(), 0.5);
        map.insert("11".to_string(), 0.5);
        assert!((shannon_entropy(&map) - 1.0).abs() < 1e-12);
        map.clear();
        map.insert("0".to_string(), 1.0);
        assert_eq!(shannon_entropy(&map), 0.0);
    }

    #[test]
    fn test_compute_zero_state() {
        let diag = Diagnostics::compute(&StateVector::new(2).unwrap());
        assert_eq!(diag.probabilities.len(), 1);
        assert!(diag.is_normalized());
        assert!((diag.purity - 1.0).abs() < 1e-12);
        assert_eq!(diag.entanglement_entropy, 0.0);
        assert_eq!(diag.measurement_entropy, 0.0);
    }
}
