//! Dense square matrices over `Complex<f64>`.
//!
//! Entries live in one row-major buffer indexed by `row * dim + col`, so a
//! unitary on n qubits is a flat `4^n` array addressed by basis-state
//! integers.

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::errors::{CircuitError, CircuitResult};

/// Dense square complex matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex<f64>>,
}

impl Matrix {
    /// All-zero `dim x dim` matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![Complex::zero(); dim * dim],
        }
    }

    /// `dim x dim` identity.
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m.set(i, i, Complex::one());
        }
        m
    }

    /// Wrap a row-major buffer. The buffer length must be a perfect square.
    pub fn from_row_major(data: Vec<Complex<f64>>) -> CircuitResult<Self> {
        let dim = (data.len() as f64).sqrt().round() as usize;
        if dim * dim != data.len() {
            return Err(CircuitError::new(format!(
                "Expected a square matrix buffer, found {} entries",
                data.len()
            )));
        }
        Ok(Self { dim, data })
    }

    /// Side length of the matrix.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of qubits this matrix acts on, if `dim` is a power of two.
    pub fn num_qubits(&self) -> Option<usize> {
        if self.dim.is_power_of_two() {
            Some(self.dim.trailing_zeros() as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.data[row * self.dim + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: Complex<f64>) {
        self.data[row * self.dim + col] = value;
    }

    /// One row of the matrix as a slice.
    pub fn row(&self, row: usize) -> &[Complex<f64>] {
        &self.data[row * self.dim..(row + 1) * self.dim]
    }

    /// Matrix-vector product `M v`.
    pub fn apply(&self, v: &[Complex<f64>]) -> Vec<Complex<f64>> {
        assert_eq!(v.len(), self.dim, "Vector length must match matrix dimension");
        (0..self.dim)
            .map(|r| {
                self.row(r)
                    .iter()
                    .zip(v.iter())
                    .map(|(m, x)| m * x)
                    .sum()
            })
            .collect()
    }

    /// Check `M† M = I` entrywise within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        for i in 0..self.dim {
            for j in 0..self.dim {
                let mut acc = Complex::<f64>::zero();
                for k in 0..self.dim {
                    acc += self.get(k, i).conj() * self.get(k, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                if (acc - Complex::new(expected, 0.0)).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Every row and every column holds exactly one entry equal to 1, all
    /// other entries are 0.
    pub fn is_permutation(&self) -> bool {
        let mut col_hits = vec![0usize; self.dim];
        for r in 0..self.dim {
            let mut row_hits = 0;
            for (c, entry) in self.row(r).iter().enumerate() {
                if entry.is_one() {
                    row_hits += 1;
                    col_hits[c] += 1;
                } else if !entry.is_zero() {
                    return false;
                }
            }
            if row_hits != 1 {
                return false;
            }
        }
        col_hits.iter().all(|&h| h == 1)
    }

    /// For a permutation matrix, the image of basis state `col`.
    pub fn permutation_image(&self, col: usize) -> Option<usize> {
        (0..self.dim).find(|&r| self.get(r, col).is_one())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_unitary_and_permutation() {
        let m = Matrix::identity(8);
        assert!(m.is_unitary(1e-12));
        assert!(m.is_permutation());
        assert_eq!(m.num_qubits(), Some(3));
    }

    #[test]
    fn hadamard_is_unitary_not_permutation() {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let h = Matrix::from_row_major(vec![
            Complex::new(s, 0.0),
            Complex::new(s, 0.0),
            Complex::new(s, 0.0),
            Complex::new(-s, 0.0),
        ])
        .unwrap();
        assert!(h.is_unitary(1e-12));
        assert!(!h.is_permutation());
    }

    #[test]
    fn non_square_buffer_rejected() {
        let buf = vec![Complex::zero(); 3];
        assert!(Matrix::from_row_major(buf).is_err());
    }

    #[test]
    fn zero_column_is_not_permutation() {
        let mut m = Matrix::identity(4);
        m.set(2, 2, Complex::zero());
        assert!(!m.is_permutation());
        assert!(!m.is_unitary(1e-9));
    }

    #[test]
    fn apply_swaps_basis_states() {
        let mut m = Matrix::zeros(2);
        m.set(0, 1, Complex::one());
        m.set(1, 0, Complex::one());
        let out = m.apply(&[Complex::one(), Complex::zero()]);
        assert_eq!(out, vec![Complex::zero(), Complex::one()]);
        assert_eq!(m.permutation_image(0), Some(1));
    }
}
