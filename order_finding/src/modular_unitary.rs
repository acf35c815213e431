//! Permutation unitary for multiplication by a constant modulo N.
//!
//! `U_b |x⟩ = |b·x mod N⟩` for `0 ≤ x < N` and `U_b |x⟩ = |x⟩` for
//! `N ≤ x < 2^n`, on the smallest register `n` holding every residue. The
//! map is a bijection exactly when `gcd(b, N) = 1`.

use std::sync::Arc;

use circuit_sim::matrix::Matrix;
use num_traits::One;

use crate::arith::{data_register_size, gcd, mod_mul};
use crate::errors::{OrderFindingError, Result};

/// Largest data register the dense matrix is built for (16 MiB per matrix).
pub const MAX_DATA_QUBITS: usize = 10;

/// `U_b` together with the parameters it was built from.
#[derive(Debug, Clone)]
pub struct ModularUnitary {
    multiplier: u64,
    modulus: u64,
    num_qubits: usize,
    matrix: Arc<Matrix>,
}

impl ModularUnitary {
    /// Build `U_b` for multiplier `b` and modulus `N`.
    pub fn build(multiplier: u64, modulus: u64) -> Result<Self> {
        if modulus < 2 {
            return Err(OrderFindingError::InvalidModulus(modulus));
        }
        let g = gcd(multiplier, modulus);
        if g > 1 {
            return Err(OrderFindingError::InvalidInput {
                base: multiplier,
                modulus,
                gcd: g,
            });
        }
        let num_qubits = data_register_size(modulus);
        if num_qubits > MAX_DATA_QUBITS {
            return Err(OrderFindingError::RegisterTooLarge {
                register: "data",
                qubits: num_qubits,
                max: MAX_DATA_QUBITS,
            });
        }

        let dim = 1usize << num_qubits;
        let mut matrix = Matrix::zeros(dim);
        for x in 0..dim as u64 {
            let image = if x < modulus {
                mod_mul(multiplier, x, modulus)
            } else {
                x
            };
            matrix.set(image as usize, x as usize, One::one());
        }

        Ok(Self {
            multiplier,
            modulus,
            num_qubits,
            matrix: Arc::new(matrix),
        })
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Register size n.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Shared handle to the matrix, for placing it in a circuit.
    pub fn shared_matrix(&self) -> Arc<Matrix> {
        Arc::clone(&self.matrix)
    }

    /// Gate label, e.g. `7×mod15`.
    pub fn label(&self) -> String {
        format!("{}×mod{}", self.multiplier, self.modulus)
    }

    /// Where basis state `x` is sent.
    pub fn image(&self, x: u64) -> u64 {
        if x < self.modulus {
            mod_mul(self.multiplier, x, self.modulus)
        } else {
            x
        }
    }
}

/// Build `U_b` and return it with its register size.
pub fn build(multiplier: u64, modulus: u64) -> Result<(Arc<Matrix>, usize)> {
    let u = ModularUnitary::build(multiplier, modulus)?;
    Ok((u.shared_matrix(), u.num_qubits()))
}
