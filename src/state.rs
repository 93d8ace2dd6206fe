use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::index::basis_label;

/// Largest register whose amplitude buffer is addressable on this target.
pub const MAX_REGISTER_QUBITS: usize = usize::BITS as usize - 6;

/// Dense state vector of an n-qubit register.
///
/// Holds all 2^n amplitudes, indexed by the big-endian bit pattern of the
/// basis state. A register is created for one run and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    pub(crate) data: Array1<Complex64>,
}

impl StateVector {
    /// Creates the |0...0> state on `num_qubits` qubits.
    ///
    /// # Errors
    /// Returns `SimError::InvalidQubitCount` if `num_qubits == 0` and
    /// `SimError::TooManyQubits` above [`MAX_REGISTER_QUBITS`].
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(SimError::InvalidQubitCount(num_qubits));
        }
        let dim = register_dim(num_qubits)?;
        let mut data = Array1::zeros(dim);
        data[0] = Complex64::new(1.0, 0.0);
        Ok(StateVector { num_qubits, data })
    }

    /// Builds a register from explicit amplitudes.
    ///
    /// The length must be a power of two, at least 2. Amplitudes are taken
    /// as given; normalization is the caller's concern.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Result<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidQubitCount(len));
        }
        Ok(StateVector {
            num_qubits: len.trailing_zeros() as usize,
            data: Array1::from(amplitudes),
        })
    }

    /// Sets amplitude[0] = 1 and all others to 0.
    pub fn reset(&mut self) {
        self.data.fill(Complex64::new(0.0, 0.0));
        self.data[0] = Complex64::new(1.0, 0.0);
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states, 2^n.
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.data
    }

    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.data[index]
    }

    /// |amplitude_i|^2
    pub fn probability(&self, index: usize) -> f64 {
        self.data[index].norm_sqr()
    }

    /// Sum of |amplitude_i|^2 over all basis states.
    pub fn total_probability(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum()
    }

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.total_probability().sqrt()
    }

    /// Binary label of basis index `index`, width n.
    pub fn label(&self, index: usize) -> String {
        basis_label(index, self.num_qubits)
    }

    /// Swap in a freshly computed amplitude buffer of the same length.
    pub(crate) fn replace_data(&mut self, data: Array1<Complex64>) {
        debug_assert_eq!(data.len(), self.data.len());
        self.data = data;
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::from(self)
    }
}

/// 2^n, or `TooManyQubits` when the buffer would not be addressable.
pub(crate) fn register_dim(num_qubits: usize) -> Result<usize> {
    u32::try_from(num_qubits)
        .ok()
        .filter(|_| num_qubits <= MAX_REGISTER_QUBITS)
        .and_then(|shift| 1usize.checked_shl(shift))
        .ok_or(SimError::TooManyQubits {
            requested: num_qubits,
            max: MAX_REGISTER_QUBITS,
        })
}

/// Plain-data view of a state vector for the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// `[re, im]` per basis state.
    pub amplitudes: Vec<[f64; 2]>,
    pub magnitudes: Vec<f64>,
    /// arg(amplitude) in radians, in (-π, π].
    pub phases: Vec<f64>,
}

impl From<&StateVector> for StateSnapshot {
    fn from(state: &StateVector) -> Self {
        let data = state.amplitudes();
        StateSnapshot {
            amplitudes: data.iter().map(|a| [a.re, a.im]).collect(),
            magnitudes: data.iter().map(|a| a.norm()).collect(),
            phases: data.iter().map(|a| a.arg()).collect(),
        }
    }
}
