use circuit_sim::errors::CircuitError;
use thiserror::Error;

/// Result type for order finding.
pub type Result<T> = std::result::Result<T, OrderFindingError>;

#[derive(Debug, Error)]
pub enum OrderFindingError {
    /// The multiplier is not invertible mod N, so multiplication by it is
    /// not a permutation. Pick a different base.
    #[error("gcd({base}, {modulus}) = {gcd} > 1: base and modulus must be coprime")]
    InvalidInput { base: u64, modulus: u64, gcd: u64 },

    #[error("Modulus must be at least 2, got {0}")]
    InvalidModulus(u64),

    /// A register would not fit in a dense simulation.
    #[error("{register} register of {qubits} qubits exceeds the supported {max}")]
    RegisterTooLarge {
        register: &'static str,
        qubits: usize,
        max: usize,
    },

    /// The selected outcome was 0, whose only candidate order is 1.
    #[error("Measured phase 0 for base {base} mod {modulus}: candidate order 1 is trivial, retry")]
    DegenerateMeasurement { modulus: u64, base: u64 },

    #[error("Backend returned no measurement outcomes")]
    EmptyHistogram,

    #[error("Malformed measurement outcome {0:?}")]
    MalformedOutcome(String),

    /// A measured value that does not fit in the control register.
    #[error("Measured value {measured} does not fit in {control_qubits} control qubits")]
    MeasurementOutOfRange { measured: u64, control_qubits: usize },

    #[error(transparent)]
    Circuit(#[from] CircuitError),
}
