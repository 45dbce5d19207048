//! Trial-division factorization with an early exit on a prime cofactor.
//!
//! The search stops at a fixed divisor limit, so very large inputs with more than one big
//! prime factor come back incomplete. For `p - 1` of a safe prime this never matters: the
//! first division by 2 leaves a prime cofactor.

use log::warn;
use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::is_probably_prime;

/// Result of a factorization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factorization {
    /// Prime factors in ascending trial order, with repetition.
    pub factors: Vec<BigUint>,
    /// `true` when the divisor limit was hit before the input was fully factored.
    pub truncated: bool,
}

impl Factorization {
    /// Factors with repetitions removed, order preserved.
    pub fn distinct(&self) -> Vec<BigUint> {
        let mut out: Vec<BigUint> = Vec::with_capacity(self.factors.len());
        for f in &self.factors {
            if !out.contains(f) {
                out.push(f.clone());
            }
        }
        out
    }

    /// Product of the factors found so far.
    pub fn product(&self) -> BigUint {
        self.factors
            .iter()
            .fold(BigUint::one(), |acc, f| acc * f)
    }
}

/// Factors integers by trial division up to `limit`.
#[derive(Debug, Clone)]
pub struct PrimeFactorizer {
    limit: BigUint,
    certainty: usize,
}

impl PrimeFactorizer {
    pub fn new(limit: u64, certainty: usize) -> Self {
        Self {
            limit: BigUint::from(limit),
            certainty,
        }
    }

    pub fn limit(&self) -> &BigUint {
        &self.limit
    }

    /// Factor `n`. Inputs `<= 1` produce an empty, complete factorization.
    pub fn factor(&self, n: &BigUint) -> Factorization {
        let mut factors = Vec::new();
        let mut rest = n.clone();
        if rest <= BigUint::one() {
            return Factorization {
                factors,
                truncated: false,
            };
        }

        let mut divisor = BigUint::from(2u64);
        // The cofactor only needs a fresh primality test after it shrank.
        let mut untested = true;
        while !rest.is_one() {
            loop {
                let (quotient, remainder) = rest.div_rem(&divisor);
                if !remainder.is_zero() {
                    break;
                }
                factors.push(divisor.clone());
                rest = quotient;
                untested = true;
            }

            if untested && !rest.is_one() && is_probably_prime(&rest, self.certainty) {
                factors.push(rest);
                return Factorization {
                    factors,
                    truncated: false,
                };
            }
            untested = false;

            divisor += BigUint::one();
            if divisor >= self.limit && !rest.is_one() {
                warn!(
                    "trial division stopped at {} with unfactored cofactor of {} bits",
                    self.limit,
                    rest.bits()
                );
                return Factorization {
                    factors,
                    truncated: true,
                };
            }
        }

        Factorization {
            factors,
            truncated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_small_composites() {
        let factorizer = PrimeFactorizer::new(20_000, 64);
        assert_eq!(factorizer.factor(&BigUint::from(22u64)).factors, big(&[2, 11]));
        assert_eq!(factorizer.factor(&BigUint::from(8u64)).factors, big(&[2, 2, 2]));
        assert_eq!(
            factorizer.factor(&BigUint::from(360u64)).factors,
            big(&[2, 2, 2, 3, 3, 5])
        );
        assert_eq!(
            factorizer.factor(&BigUint::from(1001u64)).factors,
            big(&[7, 11, 13])
        );
    }

    #[test]
    fn test_prime_input_returns_itself() {
        let factorizer = PrimeFactorizer::new(20_000, 64);
        let result = factorizer.factor(&BigUint::from(7919u64));
        assert_eq!(result.factors, big(&[7919]));
        assert!(!result.truncated);
    }

    #[test]
    fn test_trivial_inputs() {
        let factorizer = PrimeFactorizer::new(20_000, 64);
        for n in [0u64, 1] {
            let result = factorizer.factor(&BigUint::from(n));
            assert!(result.factors.is_empty());
            assert!(!result.truncated);
        }
    }

    #[test]
    fn test_distinct_and_product() {
        let factorizer = PrimeFactorizer::new(20_000, 64);
        let n = BigUint::from(2u64 * 2 * 3 * 3 * 3 * 101);
        let result = factorizer.factor(&n);
        assert_eq!(result.distinct(), big(&[2, 3, 101]));
        assert_eq!(result.product(), n);
    }

    #[test]
    fn test_large_prime_cofactor_found_early() {
        // 2 * (2^61 - 1): the cofactor is prime after the first division.
        let m61 = BigUint::from((1u64 << 61) - 1);
        let n = &m61 * BigUint::from(2u64);
        let result = PrimeFactorizer::new(20_000, 64).factor(&n);
        assert_eq!(result.factors, vec![BigUint::from(2u64), m61]);
        assert!(!result.truncated);
    }

    #[test]
    fn test_limit_truncates() {
        // 10007 * 10009, both prime and above the limit of 100.
        let n = BigUint::from(10_007u64 * 10_009);
        let result = PrimeFactorizer::new(100, 64).factor(&n);
        assert!(result.factors.is_empty());
        assert!(result.truncated);

        let result = PrimeFactorizer::new(20_000, 64).factor(&n);
        assert_eq!(result.factors, big(&[10_007, 10_009]));
        assert!(!result.truncated);
    }
}
