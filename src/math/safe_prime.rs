//! Safe-prime sampling: `p` and `(p-1)/2` both probably prime.

use log::debug;
use num_bigint_dig::{BigUint, RandPrime};
use num_traits::One;
use rand::Rng;

use super::is_probably_prime;
use crate::error::{Error, Result};

/// Samples random primes until one of them is safe, within a fixed retry budget.
#[derive(Debug, Clone)]
pub struct SafePrimeGenerator {
    certainty: usize,
    max_attempts: usize,
}

impl SafePrimeGenerator {
    pub fn new(certainty: usize, max_attempts: usize) -> Self {
        Self {
            certainty,
            max_attempts,
        }
    }

    /// `true` if both `p` and `(p-1)/2` pass the primality test.
    pub fn is_safe_prime(&self, p: &BigUint) -> bool {
        if *p < BigUint::from(5u64) {
            return false;
        }
        let q = (p - BigUint::one()) >> 1;
        is_probably_prime(&q, self.certainty) && is_probably_prime(p, self.certainty)
    }

    /// Generate a safe prime of exactly `bits` bits.
    pub fn generate<R: Rng + ?Sized>(&self, bits: usize, rng: &mut R) -> Result<BigUint> {
        if bits < 3 {
            return Err(Error::InvalidConfig(format!(
                "a safe prime needs at least 3 bits, got {}",
                bits
            )));
        }

        for attempt in 1..=self.max_attempts {
            let candidate = rng.gen_prime(bits);
            if self.is_safe_prime(&candidate) {
                debug!("safe prime of {} bits found after {} attempts", bits, attempt);
                return Ok(candidate);
            }
        }

        Err(Error::PrimeGenerationTimeout {
            bits,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_known_safe_primes() {
        let generator = SafePrimeGenerator::new(64, 1);
        for p in [5u64, 7, 11, 23, 47, 59, 83, 107, 167, 179] {
            assert!(generator.is_safe_prime(&BigUint::from(p)), "{} is safe", p);
        }
        for p in [2u64, 3, 13, 17, 29, 31, 41] {
            assert!(!generator.is_safe_prime(&BigUint::from(p)), "{} is not safe", p);
        }
    }

    #[test]
    fn test_generated_prime_is_safe() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let generator = SafePrimeGenerator::new(64, 100_000);
        for bits in [32usize, 64, 96] {
            let p = generator.generate(bits, &mut rng).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(is_probably_prime(&p, 64));
            let q = (&p - BigUint::one()) >> 1;
            assert!(is_probably_prime(&q, 64));
        }
    }

    #[test]
    fn test_same_seed_same_prime() {
        let generator = SafePrimeGenerator::new(64, 100_000);
        let a = generator
            .generate(48, &mut ChaCha20Rng::seed_from_u64(9))
            .unwrap();
        let b = generator
            .generate(48, &mut ChaCha20Rng::seed_from_u64(9))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_budget_exhaustion_is_a_timeout() {
        // A single attempt at 256 bits fails with overwhelming probability for this seed.
        let generator = SafePrimeGenerator::new(64, 1);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut timeouts = 0;
        for _ in 0..8 {
            match generator.generate(256, &mut rng) {
                Err(Error::PrimeGenerationTimeout { bits, attempts }) => {
                    assert_eq!(bits, 256);
                    assert_eq!(attempts, 1);
                    timeouts += 1;
                }
                Ok(p) => assert!(generator.is_safe_prime(&p)),
                Err(other) => panic!("unexpected error: {}", other),
            }
        }
        assert!(timeouts > 0);
    }

    #[test]
    fn test_too_few_bits() {
        let generator = SafePrimeGenerator::new(64, 10);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            generator.generate(2, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }
}
