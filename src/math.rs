pub mod factor;
pub mod primitive_root;
pub mod safe_prime;

pub use factor::{Factorization, PrimeFactorizer};
pub use primitive_root::{is_primitive_root, PrimitiveRootFinder};
pub use safe_prime::SafePrimeGenerator;

use num_bigint_dig::{prime::probably_prime, BigUint};

/// Miller-Rabin rounds needed to push the error probability below `2^-certainty`.
/// Each round lets a composite through with probability at most 1/4.
pub fn miller_rabin_rounds(certainty: usize) -> usize {
    certainty.div_ceil(2).max(1)
}

/// Probabilistic primality test at the given certainty. `0` and `1` are not prime.
pub fn is_probably_prime(n: &BigUint, certainty: usize) -> bool {
    probably_prime(n, miller_rabin_rounds(certainty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_from_certainty() {
        assert_eq!(miller_rabin_rounds(64), 32);
        assert_eq!(miller_rabin_rounds(63), 32);
        assert_eq!(miller_rabin_rounds(1), 1);
    }

    #[test]
    fn test_small_values() {
        let primes = [2u64, 3, 5, 11, 23, 7919];
        let composites = [0u64, 1, 4, 9, 21, 7917];
        for p in primes {
            assert!(is_probably_prime(&BigUint::from(p), 64), "{} is prime", p);
        }
        for c in composites {
            assert!(!is_probably_prime(&BigUint::from(c), 64), "{} is not prime", c);
        }
    }

    #[test]
    fn test_mersenne_61() {
        let m61 = BigUint::from((1u64 << 61) - 1);
        assert!(is_probably_prime(&m61, 64));
        let m61_plus_two = &m61 + BigUint::from(2u64);
        assert!(!is_probably_prime(&m61_plus_two, 64));
    }
}
