//! Measurement sampling in the computational basis.
//!
//! # Overview
//!
//! - [`probs`] - Probability of every basis state
//! - [`sample_indices`] - Draw basis indices without collapsing the state
//! - [`sample`] - Draw shots and aggregate them into a [`MeasurementHistogram`]
//!
//! Randomness always comes from a caller-supplied generator, so runs with a
//! seeded generator are reproducible.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::index::basis_label;
use crate::state::StateVector;

/// |amplitude_i|^2 for every basis index.
///
/// # Example
/// ```
/// use densesim::{StateVector, measure::probs};
/// let p = probs(&StateVector::new(2).unwrap());
/// assert_eq!(p, vec![1.0, 0.0, 0.0, 0.0]);
/// ```
pub fn probs(state: &StateVector) -> Vec<f64> {
    state.amplitudes().iter().map(|c| c.norm_sqr()).collect()
}

/// Sample an index from a probability distribution by inverse transform.
///
/// `cumulative` must be non-decreasing. Draws past the last bucket (total
/// slightly below 1 from rounding) land on the last non-empty index.
fn sample_from_cumulative(cumulative: &[f64], rng: &mut impl Rng) -> usize {
    let total = cumulative.last().copied().unwrap_or(0.0);
    let r: f64 = rng.r#gen::<f64>() * total;
    let idx = cumulative.partition_point(|&c| c <= r);
    if idx < cumulative.len() {
        return idx;
    }
    last_nonempty(cumulative)
}

fn last_nonempty(cumulative: &[f64]) -> usize {
    let mut idx = cumulative.len() - 1;
    while idx > 0 && cumulative[idx] == cumulative[idx - 1] {
        idx -= 1;
    }
    idx
}

/// Draw `shots` basis indices from the |amplitude|^2 distribution.
///
/// # Errors
/// `InvalidShots` if `shots == 0`.
pub fn sample_indices(state: &StateVector, shots: usize, rng: &mut impl Rng) -> Result<Vec<usize>> {
    if shots == 0 {
        return Err(SimError::InvalidShots(shots));
    }
    let cumulative: Vec<f64> = probs(state)
        .into_iter()
        .scan(0.0, |acc, p| {
            *acc += p;
            Some(*acc)
        })
        .collect();

    debug!(shots, dim = cumulative.len(), "sampling measurement outcomes");
    Ok((0..shots)
        .map(|_| sample_from_cumulative(&cumulative, rng))
        .collect())
}

/// Draw `shots` measurement outcomes and count them per basis label.
///
/// # Example
/// ```
/// use densesim::{StateVector, measure::sample};
/// use rand::SeedableRng;
///
/// let state = StateVector::new(2).unwrap(); // |00>
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let hist = sample(&state, 100, &mut rng).unwrap();
/// assert_eq!(hist.count("00"), 100);
/// ```
pub fn sample(state: &StateVector, shots: usize, rng: &mut impl Rng) -> Result<MeasurementHistogram> {
    let indices = sample_indices(state, shots, rng)?;
    let mut histogram = MeasurementHistogram::new(state.num_qubits());
    for idx in indices {
        histogram.record(idx);
    }
    Ok(histogram)
}

/// Counts of sampled outcomes keyed by fixed-width binary label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementHistogram {
    num_qubits: usize,
    counts: BTreeMap<String, usize>,
}

impl MeasurementHistogram {
    pub fn new(num_qubits: usize) -> Self {
        MeasurementHistogram {
            num_qubits,
            counts: BTreeMap::new(),
        }
    }

    /// Add one shot for basis index `index`.
    pub fn record(&mut self, index: usize) {
        *self
            .counts
            .entry(basis_label(index, self.num_qubits))
            .or_insert(0) += 1;
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Count for `label`, zero if never observed.
    pub fn count(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn into_counts(self) -> BTreeMap<String, usize> {
        self.counts
    }

    pub fn total_shots(&self) -> usize {
        self.counts.values().sum()
    }

    /// Label with the highest count; ties resolve to the smallest label.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (label, &n) in &self.counts {
            if best.is_none_or(|(_, m)| n > m) {
                best = Some((label.as_str(), n));
            }
        }
        best
    }

    /// Observed frequency of each label (count / total shots).
    pub fn frequencies(&self) -> BTreeMap<String, f64> {
        let total = self.total_shots();
        if total == 0 {
            return BTreeMap::new();
        }
        self.counts
            .iter()
            .map(|(label, &n)| (label.clone(), n as f64 / total as f64))
            .collect()
    }
}
