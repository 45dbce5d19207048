//! Smallest primitive root of a prime in a bounded window.

use log::debug;
use num_bigint_dig::BigUint;
use num_traits::One;

use super::factor::PrimeFactorizer;
use crate::error::{Error, Result};

/// `g` is a primitive root of `prime` iff `g^((p-1)/f) mod p != 1` for every prime
/// factor `f` of `p - 1`. `factors` may contain repetitions.
pub fn is_primitive_root(g: &BigUint, prime: &BigUint, factors: &[BigUint]) -> bool {
    let p_minus_one = prime - BigUint::one();
    factors
        .iter()
        .all(|f| !g.modpow(&(&p_minus_one / f), prime).is_one())
}

/// Searches `[start, end)` for the smallest primitive root.
#[derive(Debug, Clone)]
pub struct PrimitiveRootFinder {
    factorizer: PrimeFactorizer,
    start: u64,
    end: u64,
}

impl PrimitiveRootFinder {
    pub fn new(factorizer: PrimeFactorizer, start: u64, end: u64) -> Self {
        Self {
            factorizer,
            start,
            end,
        }
    }

    /// Find the smallest primitive root of `prime`.
    ///
    /// Candidates are capped below `prime`. Exhausting the window is a hard failure: there
    /// is no fallback generator.
    pub fn find_root(&self, prime: &BigUint) -> Result<BigUint> {
        let not_found = || Error::RootNotFound {
            prime: prime.clone(),
            start: self.start,
            end: self.end,
        };
        if *prime < BigUint::from(3u64) {
            return Err(not_found());
        }

        let p_minus_one = prime - BigUint::one();
        let factorization = self.factorizer.factor(&p_minus_one);
        let factors = factorization.distinct();
        debug!(
            "p-1 factors: [{}]{}",
            factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            if factorization.truncated { " (truncated)" } else { "" }
        );

        let mut candidate = BigUint::from(self.start);
        let end = BigUint::from(self.end).min(prime.clone());
        while candidate < end {
            if is_primitive_root(&candidate, prime, &factors) {
                return Ok(candidate);
            }
            candidate += BigUint::one();
        }
        Err(not_found())
    }
}
