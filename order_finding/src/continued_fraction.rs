//! Classical post-processing: measured integer → phase → candidate order.

use log::trace;
use num_bigint::BigInt;
use num_rational::{BigRational, Ratio};
use num_traits::Signed;

use crate::errors::{OrderFindingError, Result};

/// Widest register a phase can be read from: `2^m` must fit in a `u64`.
pub const MAX_PHASE_BITS: usize = 63;

/// The phase `measured / 2^m` as an exact fraction in `[0, 1)`.
pub fn phase_from_measurement(measured: u64, control_qubits: usize) -> Result<Ratio<u64>> {
    if control_qubits > MAX_PHASE_BITS {
        return Err(OrderFindingError::RegisterTooLarge {
            register: "control",
            qubits: control_qubits,
            max: MAX_PHASE_BITS,
        });
    }
    let scale = 1u64 << control_qubits;
    if measured >= scale {
        return Err(OrderFindingError::MeasurementOutOfRange {
            measured,
            control_qubits,
        });
    }
    Ok(Ratio::new(measured, scale))
}

/// Convergents `p_k / q_k` of the continued-fraction expansion of `value`,
/// ending with `value` itself.
pub fn convergents(value: Ratio<u64>) -> Vec<Ratio<u64>> {
    let (mut n, mut d) = (*value.numer() as u128, *value.denom() as u128);
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let mut out = Vec::new();
    while d != 0 {
        let a = n / d;
        let (p2, q2) = (p0 + a * p1, q0 + a * q1);
        out.push(Ratio::new(p2 as u64, q2 as u64));
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        (n, d) = (d, n - a * d);
    }
    out
}

/// The fraction closest to `value` with denominator at most
/// `max_denominator`.
///
/// Walks the convergents until the next denominator would be too large,
/// then picks between the last convergent and the largest admissible
/// semiconvergent. Ties go to the convergent. A bound of 0 is treated as 1.
pub fn limit_denominator(value: Ratio<u64>, max_denominator: u64) -> Ratio<u64> {
    let max_denominator = max_denominator.max(1);
    if *value.denom() <= max_denominator {
        return value;
    }
    let max = max_denominator as u128;
    let (mut n, mut d) = (*value.numer() as u128, *value.denom() as u128);
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    // Terminates before d reaches 0: the final convergent has denominator
    // value.denom() > max.
    loop {
        let a = n / d;
        let q2 = match a.checked_mul(q1).and_then(|x| x.checked_add(q0)) {
            Some(q2) if q2 <= max => q2,
            _ => break,
        };
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max - q0) / q1;
    let semi = (p0 + k * p1, q0 + k * q1);
    let conv = (p1, q1);

    let target = BigRational::new(BigInt::from(*value.numer()), BigInt::from(*value.denom()));
    let distance = |(p, q): (u128, u128)| {
        (BigRational::new(BigInt::from(p), BigInt::from(q)) - &target).abs()
    };
    // Numerators never exceed the input numerator, so they fit in u64.
    let (p, q) = if distance(conv) <= distance(semi) {
        conv
    } else {
        semi
    };
    Ratio::new(p as u64, q as u64)
}

/// Candidate order from a measured control-register value.
///
/// The phase `measured / 2^m` is approximated by the closest fraction with
/// denominator at most N, and that denominator is returned. A measurement of
/// 0 gives 1; callers must reject that. Whether `a^r ≡ 1 (mod N)` actually
/// holds is not checked here. Fails when `measured` does not fit in `m` bits
/// or `m` exceeds [`MAX_PHASE_BITS`].
pub fn estimate_order(measured: u64, control_qubits: usize, modulus: u64) -> Result<u64> {
    let phase = phase_from_measurement(measured, control_qubits)?;
    let approx = limit_denominator(phase, modulus);
    trace!("phase {} ~ {} (denominator <= {})", phase, approx, modulus);
    Ok(*approx.denom())
}
