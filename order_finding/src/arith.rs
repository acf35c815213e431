//! Integer helpers shared by the circuit builders and the order finders.

use num_integer::Integer;

/// Greatest common divisor.
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// `base^exp mod modulus` by square-and-multiply.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = modulus as u128;
    let mut result: u128 = 1;
    let mut b = base as u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// `a * b mod modulus` without overflow.
pub fn mod_mul(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Qubits needed to hold every residue mod N: ⌊log2(N−1)⌋ + 1.
///
/// Computed as the bit length of N−1, which is exact where a floating
/// point logarithm is not. Requires N ≥ 2.
pub fn data_register_size(modulus: u64) -> usize {
    debug_assert!(modulus >= 2);
    (u64::BITS - (modulus - 1).leading_zeros()) as usize
}

/// Default control register size ⌈2·log2(N)⌉ + 1, so that 2^m ≥ 2N².
///
/// ⌈log2(N²)⌉ is the bit length of N²−1. Requires N ≥ 2.
pub fn control_register_size(modulus: u64) -> usize {
    debug_assert!(modulus >= 2);
    let sq = modulus as u128 * modulus as u128;
    (u128::BITS - (sq - 1).leading_zeros()) as usize + 1
}

/// True if `base^r ≡ 1 (mod N)`.
pub fn is_order_candidate(base: u64, r: u64, modulus: u64) -> bool {
    r > 0 && mod_pow(base, r, modulus) == 1 % modulus
}

/// Least common multiple, used to combine partial orders.
pub fn lcm(a: u64, b: u64) -> u64 {
    a.lcm(&b)
}
