//! Controlled `U_{a^e mod N}` gates for the phase-estimation ladder.

use circuit_sim::circuit::ControlledGate;
use circuit_sim::matrix::Matrix;
use circuit_sim::Complex;
use log::trace;

use crate::arith::mod_pow;
use crate::errors::Result;
use crate::modular_unitary::ModularUnitary;

/// Multiplication by `a^exponent mod N`, to be applied under one control
/// qubit.
#[derive(Debug, Clone)]
pub struct ControlledPower {
    base: u64,
    exponent: u64,
    unitary: ModularUnitary,
}

/// Compute `b = a^exponent mod N` and wrap `U_b` for single-qubit control.
pub fn controlled_power_gate(base: u64, exponent: u64, modulus: u64) -> Result<ControlledPower> {
    let multiplier = mod_pow(base, exponent, modulus);
    trace!("{}^{} mod {} = {}", base, exponent, modulus, multiplier);
    let unitary = ModularUnitary::build(multiplier, modulus)?;
    Ok(ControlledPower::new(base, exponent, unitary))
}

impl ControlledPower {
    /// Wrap an already built `U_b`, where `b` must be `base^exponent mod N`.
    pub fn new(base: u64, exponent: u64, unitary: ModularUnitary) -> Self {
        debug_assert_eq!(
            unitary.multiplier(),
            mod_pow(base, exponent, unitary.modulus())
        );
        Self {
            base,
            exponent,
            unitary,
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    /// `a^exponent mod N`.
    pub fn multiplier(&self) -> u64 {
        self.unitary.multiplier()
    }

    /// Width n of the data register the gate acts on.
    pub fn num_target_qubits(&self) -> usize {
        self.unitary.num_qubits()
    }

    pub fn unitary(&self) -> &ModularUnitary {
        &self.unitary
    }

    /// The full (n+1)-qubit operator with the control as qubit 0:
    /// identity on the control-|0⟩ block, `U_b` on the control-|1⟩ block.
    pub fn controlled_matrix(&self) -> Matrix {
        let u = self.unitary.matrix();
        let dim = u.dim();
        let mut full = Matrix::zeros(2 * dim);
        for r in 0..dim {
            full.set(r << 1, r << 1, Complex::new(1.0, 0.0));
            for c in 0..dim {
                full.set((r << 1) | 1, (c << 1) | 1, u.get(r, c));
            }
        }
        full
    }

    /// Place the gate with `control` as control qubit and `targets` as the
    /// data register, least significant qubit first.
    pub fn place(&self, control: usize, targets: &[usize]) -> Result<ControlledGate> {
        Ok(ControlledGate::new(
            self.unitary.label(),
            control,
            targets,
            self.unitary.shared_matrix(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OrderFindingError;

    #[test]
    fn exponent_is_applied() {
        let g = controlled_power_gate(7, 2, 15).unwrap();
        assert_eq!(g.multiplier(), 4);
        assert_eq!(g.num_target_qubits(), 4);
        let g = controlled_power_gate(7, 4, 15).unwrap();
        assert_eq!(g.multiplier(), 1);
        assert!(g.unitary().matrix().is_permutation());
    }

    #[test]
    fn controlled_form_is_unitary_and_controlled() {
        let g = controlled_power_gate(2, 1, 5).unwrap();
        let full = g.controlled_matrix();
        assert_eq!(full.dim(), 16);
        assert!(full.is_unitary(1e-12));
        assert!(full.is_permutation());
        // control 0: |x⟩|0⟩ untouched
        for x in 0..8 {
            assert_eq!(full.permutation_image(x << 1), Some(x << 1));
        }
        // control 1: |x⟩|1⟩ -> |2x mod 5⟩|1⟩
        assert_eq!(full.permutation_image((3 << 1) | 1), Some((1 << 1) | 1));
        assert_eq!(full.permutation_image((6 << 1) | 1), Some((6 << 1) | 1));
    }

    #[test]
    fn non_coprime_base_propagates() {
        assert!(matches!(
            controlled_power_gate(6, 1, 21),
            Err(OrderFindingError::InvalidInput { gcd: 3, .. })
        ));
    }

    #[test]
    fn placement_checks_width() {
        let g = controlled_power_gate(7, 1, 15).unwrap();
        assert!(g.place(0, &[1, 2, 3, 4]).is_ok());
        assert!(matches!(
            g.place(0, &[1, 2, 3]),
            Err(OrderFindingError::Circuit(_))
        ));
    }
}
