use crate::arith::control_register_size;

/// Default number of order-finding repetitions for callers that retry.
pub const DEFAULT_N_TIMES_SHOR: usize = 10;
/// Default number of circuit executions per trial.
pub const DEFAULT_SHOTS: usize = 1;

/// Configuration of the quantum order finder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFindingConfig {
    /// How many trials a repeating caller should run. Each call to
    /// `find_order` is a single trial regardless of this value.
    pub n_times_shor: usize,
    /// Control register size. `None` means ⌈2·log2(N)⌉ + 1 for each N.
    pub m: Option<usize>,
    /// Circuit executions per trial.
    pub shots: usize,
    /// Seed for the simulator's sampling; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for OrderFindingConfig {
    fn default() -> Self {
        Self {
            n_times_shor: DEFAULT_N_TIMES_SHOR,
            m: None,
            shots: DEFAULT_SHOTS,
            seed: None,
        }
    }
}

impl OrderFindingConfig {
    pub fn with_m(mut self, m: usize) -> Self {
        self.m = Some(m);
        self
    }

    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_n_times_shor(mut self, n_times_shor: usize) -> Self {
        self.n_times_shor = n_times_shor;
        self
    }

    /// Control register size for modulus `modulus`. Resolved per call and
    /// never stored, so one configuration serves every modulus.
    pub fn control_qubits(&self, modulus: u64) -> usize {
        self.m.unwrap_or_else(|| control_register_size(modulus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = OrderFindingConfig::default();
        assert_eq!(c.n_times_shor, 10);
        assert_eq!(c.shots, 1);
        assert_eq!(c.m, None);
        assert_eq!(c.seed, None);
    }

    #[test]
    fn m_is_resolved_per_modulus() {
        let c = OrderFindingConfig::default();
        assert_eq!(c.control_qubits(15), 9);
        assert_eq!(c.control_qubits(21), 10);
        // resolving did not pin m to the first modulus
        assert_eq!(c.m, None);
        assert_eq!(c.with_m(8).control_qubits(21), 8);
    }
}
