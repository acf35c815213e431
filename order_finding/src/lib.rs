//! # order_finding
//!
//! The quantum subroutine of Shor's algorithm: estimate the multiplicative
//! order r of `a` modulo `N` (the smallest r > 0 with a^r ≡ 1 mod N) by
//! phase estimation of the modular multiplication unitary.
//!
//! ```text
//! modular_unitary      U_b |x⟩ = |b·x mod N⟩, identity for x ≥ N
//!   ↓
//! controlled_power     controlled U_{a^(2^i) mod N}
//!   ↓
//! phase_estimation     H^⊗m · ladder · QFT† · measure(ctrl)
//!   ↓  (circuit_sim backend: circuit, shots → histogram)
//! continued_fraction   y / 2^m ≈ k / r, denominator ≤ N
//!   ↓
//! order_finder         one trial → candidate r
//! ```
//!
//! One call is one measurement round. The candidate may be a proper divisor
//! of the true order, or the trivial 1; repeating trials and checking
//! `a^r ≡ 1` is the caller's job.
//!
//! ## Usage
//!
//! ```no_run
//! use order_finding::prelude::*;
//!
//! let config = OrderFindingConfig::default().with_shots(64).with_seed(7);
//! let mut finder = QuantumOrderFinder::new(config);
//! match finder.find_order(15, 7) {
//!     Ok(r) => println!("candidate order: {}", r),
//!     Err(OrderFindingError::DegenerateMeasurement { .. }) => println!("retry"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

pub mod arith;
pub mod config;
pub mod continued_fraction;
pub mod controlled_power;
pub mod errors;
pub mod modular_unitary;
pub mod order_finder;
pub mod phase_estimation;
#[cfg(test)]
mod tests;

pub use config::OrderFindingConfig;
pub use errors::{OrderFindingError, Result};
pub use order_finder::{ClassicalOrderFinder, OrderEstimate, OrderFinder, QuantumOrderFinder};

pub mod prelude {
    pub use crate::arith::*;
    pub use crate::config::*;
    pub use crate::continued_fraction::*;
    pub use crate::controlled_power::*;
    pub use crate::errors::OrderFindingError;
    pub use crate::modular_unitary::{ModularUnitary, MAX_DATA_QUBITS};
    pub use crate::order_finder::*;
    pub use crate::phase_estimation::*;
}
