use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::sync::LazyLock;

/// The fixed single-qubit gate library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    T,
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

static I_MATRIX: LazyLock<Array2<Complex64>> =
    LazyLock::new(|| array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(1.0, 0.0)]]);

static X_MATRIX: LazyLock<Array2<Complex64>> =
    LazyLock::new(|| array![[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]);

static Y_MATRIX: LazyLock<Array2<Complex64>> =
    LazyLock::new(|| array![[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]);

static Z_MATRIX: LazyLock<Array2<Complex64>> =
    LazyLock::new(|| array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]);

static H_MATRIX: LazyLock<Array2<Complex64>> = LazyLock::new(|| {
    let s = c(FRAC_1_SQRT_2, 0.0);
    array![[s, s], [s, -s]]
});

static S_MATRIX: LazyLock<Array2<Complex64>> =
    LazyLock::new(|| array![[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 1.0)]]);

// T = diag(1, e^(iπ/4))
static T_MATRIX: LazyLock<Array2<Complex64>> = LazyLock::new(|| {
    array![
        [c(1.0, 0.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, FRAC_PI_4)]
    ]
});

impl Gate {
    /// All gates in the library, in a fixed order.
    pub const ALL: [Gate; 7] = [Gate::I, Gate::X, Gate::Y, Gate::Z, Gate::H, Gate::S, Gate::T];

    /// Returns the shared 2x2 matrix of the gate.
    ///
    /// The matrices are built once per process and never mutated.
    pub fn matrix(&self) -> &'static Array2<Complex64> {
        match self {
            Gate::I => &I_MATRIX,
            Gate::X => &X_MATRIX,
            Gate::Y => &Y_MATRIX,
            Gate::Z => &Z_MATRIX,
            Gate::H => &H_MATRIX,
            Gate::S => &S_MATRIX,
            Gate::T => &T_MATRIX,
        }
    }

    /// Upper-case mnemonic, as used in program listings and JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::I => "I",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::H => "H",
            Gate::S => "S",
            Gate::T => "T",
        }
    }

    /// Parse a mnemonic, case-insensitively. `CNOT` is not a single-qubit gate.
    pub fn from_name(name: &str) -> Option<Gate> {
        Gate::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
    }

    /// Returns whether the gate is diagonal.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Gate::I | Gate::Z | Gate::S | Gate::T)
    }

    /// Returns whether the gate is its own inverse.
    pub fn is_self_inverse(&self) -> bool {
        matches!(self, Gate::I | Gate::X | Gate::Y | Gate::Z | Gate::H)
    }

    /// Adjoint within the gate set. `S` and `T` have no adjoint here.
    pub fn dagger(&self) -> Option<Gate> {
        if self.is_self_inverse() { Some(*self) } else { None }
    }

    /// Smallest k >= 1 with gate^k = I.
    pub fn order(&self) -> usize {
        match self {
            Gate::I => 1,
            Gate::X | Gate::Y | Gate::Z | Gate::H => 2,
            Gate::S => 4,
            Gate::T => 8,
        }
    }
}
