//! State-vector evolution.
//!
//! Amplitudes are stored in one `Vec<Complex<f64>>` of length `2^n`. With
//! the `parallel` feature the per-amplitude loops run on rayon.

use num_complex::Complex;
use num_traits::{One, Zero};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::circuit::ControlledGate;

/// Pure state of `n` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    n: usize,
    amps: Vec<Complex<f64>>,
}

/// Extract bits `qubits[k]` of `index` into bit `k` of the result.
#[inline]
pub fn gather_bits(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (k, &q)| acc | (((index >> q) & 1) << k))
}

/// Overwrite bits `qubits[k]` of `index` with bit `k` of `value`.
#[inline]
pub fn scatter_bits(index: usize, qubits: &[usize], value: usize) -> usize {
    qubits.iter().enumerate().fold(index, |acc, (k, &q)| {
        (acc & !(1 << q)) | (((value >> k) & 1) << q)
    })
}

impl StateVector {
    /// |0…0⟩ on `n` qubits.
    pub fn zero_state(n: usize) -> Self {
        let mut amps = vec![Complex::zero(); 1usize << n];
        amps[0] = Complex::one();
        Self { n, amps }
    }

    pub fn num_qubits(&self) -> usize {
        self.n
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amps
    }

    pub fn into_amplitudes(self) -> Vec<Complex<f64>> {
        self.amps
    }

    /// Squared norm; 1 for a normalised state.
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn apply_x(&mut self, q: usize) {
        let stride = 1usize << q;
        for_each_pair(&mut self.amps, stride, |a, b| std::mem::swap(a, b));
    }

    pub fn apply_h(&mut self, q: usize) {
        let stride = 1usize << q;
        let s = std::f64::consts::FRAC_1_SQRT_2;
        for_each_pair(&mut self.amps, stride, |a, b| {
            let (x, y) = (*a, *b);
            *a = (x + y) * s;
            *b = (x - y) * s;
        });
    }

    /// Multiply by `e^{i theta}` every amplitude with both `a` and `b` set.
    pub fn apply_cphase(&mut self, a: usize, b: usize, theta: f64) {
        let mask = (1usize << a) | (1usize << b);
        let phase = Complex::from_polar(1.0, theta);
        let f = |(i, amp): (usize, &mut Complex<f64>)| {
            if i & mask == mask {
                *amp *= phase;
            }
        };
        #[cfg(feature = "parallel")]
        self.amps.par_iter_mut().enumerate().for_each(f);
        #[cfg(not(feature = "parallel"))]
        self.amps.iter_mut().enumerate().for_each(f);
    }

    pub fn apply_swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (ma, mb) = (1usize << a, 1usize << b);
        for i in 0..self.amps.len() {
            // Visit each |..1..0..⟩ / |..0..1..⟩ pair once.
            if i & ma != 0 && i & mb == 0 {
                self.amps.swap(i, (i & !ma) | mb);
            }
        }
    }

    /// Apply the gate's unitary to its targets on every branch where the
    /// control qubit is |1⟩.
    pub fn apply_controlled(&mut self, gate: &ControlledGate) {
        let control = 1usize << gate.control();
        let targets = gate.targets();
        let u = gate.unitary();
        let old = &self.amps;
        let f = |i: usize| -> Complex<f64> {
            if i & control == 0 {
                return old[i];
            }
            let row = gather_bits(i, targets);
            u.row(row)
                .iter()
                .enumerate()
                .filter(|(_, m)| !m.is_zero())
                .map(|(col, m)| m * old[scatter_bits(i, targets, col)])
                .sum()
        };
        #[cfg(feature = "parallel")]
        let amps: Vec<Complex<f64>> = (0..old.len()).into_par_iter().map(f).collect();
        #[cfg(not(feature = "parallel"))]
        let amps: Vec<Complex<f64>> = (0..old.len()).map(f).collect();
        self.amps = amps;
    }

    /// Probability of each value of the register formed by `qubits`
    /// (`qubits[k]` is bit `k`), summed over every other qubit.
    pub fn marginal_probabilities(&self, qubits: &[usize]) -> Vec<f64> {
        let mut probs = vec![0.0; 1usize << qubits.len()];
        for (i, amp) in self.amps.iter().enumerate() {
            probs[gather_bits(i, qubits)] += amp.norm_sqr();
        }
        probs
    }
}

/// Run `f` on every amplitude pair `(i, i | stride)` with the `stride` bit
/// clear in `i`.
fn for_each_pair<F>(amps: &mut [Complex<f64>], stride: usize, f: F)
where
    F: Fn(&mut Complex<f64>, &mut Complex<f64>) + Sync + Send,
{
    let chunk = |block: &mut [Complex<f64>]| {
        let (lo, hi) = block.split_at_mut(stride);
        lo.iter_mut().zip(hi.iter_mut()).for_each(|(a, b)| f(a, b));
    };
    #[cfg(feature = "parallel")]
    amps.par_chunks_mut(2 * stride).for_each(chunk);
    #[cfg(not(feature = "parallel"))]
    amps.chunks_mut(2 * stride).for_each(chunk);
}
