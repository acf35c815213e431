//! Executing circuits and sampling measurement outcomes.

use std::collections::BTreeMap;

use log::debug;
use num_complex::Complex;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::circuit::{Circuit, Operation};
use crate::errors::{CircuitError, CircuitResult};
use crate::qft::apply_inverse_qft;
use crate::state::StateVector;

/// Largest circuit the dense simulator accepts.
pub const MAX_QUBITS: usize = 24;

/// Observation counts keyed by measured bitstring, most significant bit
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram {
    counts: BTreeMap<String, usize>,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bits`.
    pub fn record<S: Into<String>>(&mut self, bits: S, count: usize) {
        *self.counts.entry(bits.into()).or_insert(0) += count;
    }

    pub fn get(&self, bits: &str) -> usize {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The bitstring with the highest count.
    ///
    /// Ties go to the lowest integer value, whatever the key widths.
    pub fn most_frequent(&self) -> Option<(&str, usize)> {
        self.iter()
            .max_by(|(a, ca), (b, cb)| {
                ca.cmp(cb)
                    .then_with(|| numeric_order(b).cmp(&numeric_order(a)))
            })
    }
}

impl FromIterator<(String, usize)> for Histogram {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut h = Histogram::new();
        for (bits, count) in iter {
            h.record(bits, count);
        }
        h
    }
}

/// Sort key that orders binary strings by value: leading zeros dropped,
/// then shorter is smaller.
fn numeric_order(bits: &str) -> (usize, &str) {
    let significant = bits.trim_start_matches('0');
    (significant.len(), significant)
}

/// Format `value` as a `width`-bit string, most significant bit first.
pub fn to_bitstring(value: usize, width: usize) -> String {
    format!("{:0width$b}", value, width = width)
}

/// Something that can execute a circuit and report measurement statistics.
pub trait Backend {
    /// Run `circuit` `shots` times. The returned counts sum to `shots`.
    fn run(&mut self, circuit: &Circuit, shots: usize) -> CircuitResult<Histogram>;
}

/// Exact dense state-vector simulator with seeded sampling.
#[derive(Debug, Clone)]
pub struct StateVectorBackend {
    rng: StdRng,
}

impl Default for StateVectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StateVectorBackend {
    /// Sampling seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sampling.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Evolve |0…0⟩ through every unitary operation of `circuit`.
    /// Measurements are not applied.
    pub fn state_vector(&self, circuit: &Circuit) -> CircuitResult<Vec<Complex<f64>>> {
        Ok(self.evolve(circuit)?.into_amplitudes())
    }

    /// Exact outcome distribution over the measured qubits, indexed by the
    /// classical register value.
    pub fn probabilities(&self, circuit: &Circuit) -> CircuitResult<Vec<f64>> {
        let measured = circuit.measured_qubits();
        if measured.is_empty() {
            return Err(CircuitError::new("Circuit has no measurements"));
        }
        let state = self.evolve(circuit)?;
        Ok(state.marginal_probabilities(&measured))
    }

    fn evolve(&self, circuit: &Circuit) -> CircuitResult<StateVector> {
        let n = circuit.num_qubits();
        if n == 0 {
            return Err(CircuitError::new("Circuit has no qubits"));
        }
        if n > MAX_QUBITS {
            return Err(CircuitError::new(format!(
                "Circuit needs {} qubits, dense simulation supports at most {}",
                n, MAX_QUBITS
            )));
        }
        debug!(
            "Simulating {} qubits through {} operations",
            n,
            circuit.operations().len()
        );
        let mut state = StateVector::zero_state(n);
        for op in circuit.operations() {
            match op {
                Operation::X { target } => state.apply_x(*target),
                Operation::H { target } => state.apply_h(*target),
                Operation::Controlled(gate) => state.apply_controlled(gate),
                Operation::InverseQft { qubits, do_swaps } => {
                    apply_inverse_qft(&mut state, qubits, *do_swaps)
                }
                Operation::Measure { .. } => {}
            }
        }
        Ok(state)
    }
}

impl Backend for StateVectorBackend {
    fn run(&mut self, circuit: &Circuit, shots: usize) -> CircuitResult<Histogram> {
        if shots == 0 {
            return Err(CircuitError::new("Number of shots must be positive"));
        }
        let width = circuit.measured_qubits().len();
        let probs = self.probabilities(circuit)?;
        let dist = WeightedIndex::new(&probs)
            .map_err(|e| CircuitError::new(format!("Invalid outcome distribution: {}", e)))?;

        let mut tally = vec![0usize; probs.len()];
        for _ in 0..shots {
            tally[dist.sample(&mut self.rng)] += 1;
        }
        Ok(tally
            .into_iter()
            .enumerate()
            .filter(|&(_, c)| c > 0)
            .map(|(value, c)| (to_bitstring(value, width), c))
            .collect())
    }
}
