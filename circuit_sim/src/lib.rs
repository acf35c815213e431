//! # circuit_sim
//!
//! Small dense state-vector simulator for circuits built from Hadamards,
//! Pauli X, singly-controlled dense unitaries and the inverse quantum
//! Fourier transform.
//!
//! A [`Circuit`](circuit::Circuit) is an append-only list of operations over
//! named registers. A [`Backend`](backend::Backend) executes it for a number
//! of shots and returns a [`Histogram`](backend::Histogram) of measured
//! bitstrings.
//!
//! ```
//! use circuit_sim::prelude::*;
//!
//! # fn main() -> CircuitResult<()> {
//! let mut c = Circuit::new();
//! let q = c.add_register("q", 1);
//! let out = c.add_classical_register("c", 1);
//! c.h(q.qubit(0))?;
//! c.measure(&q, &out)?;
//!
//! let mut backend = StateVectorBackend::with_seed(3);
//! let counts = backend.run(&c, 100)?;
//! assert_eq!(counts.total(), 100);
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod circuit;
pub mod errors;
pub mod matrix;
pub mod qft;
pub mod state;

pub use num_complex::Complex;

pub mod prelude {
    pub use crate::backend::{to_bitstring, Backend, Histogram, StateVectorBackend, MAX_QUBITS};
    pub use crate::circuit::{Circuit, ControlledGate, Operation, Register};
    pub use crate::errors::{CircuitError, CircuitResult};
    pub use crate::matrix::Matrix;
    pub use crate::Complex;
}
