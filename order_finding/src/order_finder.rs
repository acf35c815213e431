//! Order finders: the quantum phase-estimation trial and a classical
//! reference.

use circuit_sim::backend::{Backend, Histogram, StateVectorBackend};
use log::{debug, info, warn};
use num_rational::Ratio;

use crate::arith::{gcd, mod_mul};
use crate::config::OrderFindingConfig;
use crate::continued_fraction::{estimate_order, phase_from_measurement};
use crate::errors::{OrderFindingError, Result};
use crate::phase_estimation::build_circuit;

/// Something that proposes the multiplicative order of `base` mod `modulus`.
pub trait OrderFinder {
    fn find_order(&mut self, modulus: u64, base: u64) -> Result<u64>;
}

/// Everything one quantum trial observed.
#[derive(Debug, Clone)]
pub struct OrderEstimate {
    pub modulus: u64,
    pub base: u64,
    /// m used for this trial.
    pub control_qubits: usize,
    /// Selected bitstring, most significant bit first.
    pub bitstring: String,
    /// Its integer value.
    pub measured: u64,
    /// `measured / 2^m`.
    pub phase: Ratio<u64>,
    /// Denominator of the best approximation to `phase` with denominator ≤ N.
    pub order: u64,
    pub histogram: Histogram,
}

impl OrderEstimate {
    /// A zero phase carries no information about the order.
    pub fn is_degenerate(&self) -> bool {
        self.measured == 0
    }
}

/// One measurement round of phase estimation on a simulated backend.
#[derive(Debug, Clone)]
pub struct QuantumOrderFinder<B = StateVectorBackend> {
    config: OrderFindingConfig,
    backend: B,
}

impl QuantumOrderFinder<StateVectorBackend> {
    /// Finder on the built-in state-vector simulator, seeded from
    /// `config.seed` when set.
    pub fn new(config: OrderFindingConfig) -> Self {
        let backend = match config.seed {
            Some(seed) => StateVectorBackend::with_seed(seed),
            None => StateVectorBackend::new(),
        };
        Self { config, backend }
    }
}

impl Default for QuantumOrderFinder<StateVectorBackend> {
    fn default() -> Self {
        Self::new(OrderFindingConfig::default())
    }
}

impl<B: Backend> QuantumOrderFinder<B> {
    pub fn with_backend(config: OrderFindingConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &OrderFindingConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Run one trial and report what was measured. A zero measurement is
    /// returned as is, with order 1.
    pub fn find_order_detailed(&mut self, modulus: u64, base: u64) -> Result<OrderEstimate> {
        if modulus < 2 {
            return Err(OrderFindingError::InvalidModulus(modulus));
        }
        let m = self.config.control_qubits(modulus);
        debug!("Control qubits (m): {}", m);

        let pe = build_circuit(modulus, base, m)?;
        let histogram = self.backend.run(pe.circuit(), self.config.shots)?;

        if let Some((bits, _)) = histogram.iter().find(|(bits, _)| bits.len() != m) {
            return Err(OrderFindingError::MalformedOutcome(bits.to_string()));
        }
        // Ties resolve to the lowest value.
        let (bitstring, count) = histogram
            .most_frequent()
            .map(|(bits, count)| (bits.to_string(), count))
            .ok_or(OrderFindingError::EmptyHistogram)?;
        let measured = u64::from_str_radix(&bitstring, 2)
            .map_err(|_| OrderFindingError::MalformedOutcome(bitstring.clone()))?;

        let phase = phase_from_measurement(measured, m)?;
        let order = estimate_order(measured, m, modulus)?;
        info!(
            "Phase found = {} ({} of {} shots), for N = {} and a = {}: r = {}",
            phase, count, self.config.shots, modulus, base, order
        );

        Ok(OrderEstimate {
            modulus,
            base,
            control_qubits: m,
            bitstring,
            measured,
            phase,
            order,
            histogram,
        })
    }
}

impl<B: Backend> OrderFinder for QuantumOrderFinder<B> {
    /// Candidate order from one measurement round. It may be a proper
    /// divisor of the true order; checking `a^r ≡ 1` is up to the caller.
    fn find_order(&mut self, modulus: u64, base: u64) -> Result<u64> {
        let estimate = self.find_order_detailed(modulus, base)?;
        if estimate.is_degenerate() {
            warn!(
                "Degenerate measurement for a = {}, N = {}: phase 0",
                base, modulus
            );
            return Err(OrderFindingError::DegenerateMeasurement { modulus, base });
        }
        Ok(estimate.order)
    }
}

/// Exact order by repeated multiplication. Linear in the order.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicalOrderFinder;

impl OrderFinder for ClassicalOrderFinder {
    fn find_order(&mut self, modulus: u64, base: u64) -> Result<u64> {
        if modulus < 2 {
            return Err(OrderFindingError::InvalidModulus(modulus));
        }
        let g = gcd(base, modulus);
        if g > 1 {
            return Err(OrderFindingError::InvalidInput { base, modulus, gcd: g });
        }
        let b = base % modulus;
        let mut x = b;
        let mut r = 1;
        while x != 1 % modulus {
            x = mod_mul(x, b, modulus);
            r += 1;
        }
        Ok(r)
    }
}
