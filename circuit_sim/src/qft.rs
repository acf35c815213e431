//! Inverse quantum Fourier transform, decomposed into elementary gates.
//!
//! Maps |x⟩ to `2^{-m/2} Σ_y e^{-2πi·xy/2^m} |y⟩` on an m-qubit register
//! whose first qubit is the least significant bit. The gate order is the
//! reverse of the forward transform: bit-reversal swaps first, then for each
//! qubit j (least significant first) the controlled phase rotations from the
//! lower qubits followed by a Hadamard.

use std::f64::consts::PI;

use crate::state::StateVector;

/// Elementary gate of the decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QftStep {
    Swap(usize, usize),
    H(usize),
    /// Phase `e^{i theta}` when both qubits are |1⟩.
    CPhase(usize, usize, f64),
}

/// Gate sequence for the inverse QFT over `qubits`.
pub fn inverse_qft_steps(qubits: &[usize], do_swaps: bool) -> Vec<QftStep> {
    let m = qubits.len();
    let mut steps = Vec::with_capacity(m / 2 + m * (m + 1) / 2);
    if do_swaps {
        for i in 0..m / 2 {
            steps.push(QftStep::Swap(qubits[i], qubits[m - 1 - i]));
        }
    }
    for j in 0..m {
        for k in 0..j {
            let theta = -PI / (1u64 << (j - k)) as f64;
            steps.push(QftStep::CPhase(qubits[j], qubits[k], theta));
        }
        steps.push(QftStep::H(qubits[j]));
    }
    steps
}

/// Apply the inverse QFT over `qubits` to `state`.
pub fn apply_inverse_qft(state: &mut StateVector, qubits: &[usize], do_swaps: bool) {
    for step in inverse_qft_steps(qubits, do_swaps) {
        match step {
            QftStep::Swap(a, b) => state.apply_swap(a, b),
            QftStep::H(q) => state.apply_h(q),
            QftStep::CPhase(a, b, theta) => state.apply_cphase(a, b, theta),
        }
    }
}
