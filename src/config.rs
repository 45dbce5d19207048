//! Tunables for one run of the exchange.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::error::{Error, Result};

/// Bit length of the generated prime.
pub const KEY_LENGTH: usize = 512;

/// Primality certainty: a composite slips through with probability at most `2^-CERTAINTY`.
pub const CERTAINTY: usize = 64;

/// Trial division stops once the divisor reaches this value.
pub const FACTOR_LIMIT: u64 = 20_000;

/// First candidate tried by the primitive-root search.
pub const ROOT_START: u64 = 3;

/// Exclusive upper bound of the primitive-root search.
pub const ROOT_END: u64 = 100_000_000;

/// Number of prime candidates sampled before safe-prime generation gives up.
pub const MAX_PRIME_ATTEMPTS: usize = 100_000;

/// Configuration for parameter generation and key agreement.
///
/// *This is for demonstration only. DO NOT use in real systems.*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// The bit length of the prime `p`.
    pub key_bits: usize,
    /// Certainty used for every primality test.
    pub certainty: usize,
    /// Trial-division cutoff for factoring `p - 1`.
    pub factor_limit: u64,
    /// Inclusive start of the primitive-root search.
    pub root_start: u64,
    /// Exclusive end of the primitive-root search.
    pub root_end: u64,
    /// Retry budget for safe-prime sampling.
    pub max_prime_attempts: usize,
    /// Optional RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            key_bits: KEY_LENGTH,
            certainty: CERTAINTY,
            factor_limit: FACTOR_LIMIT,
            root_start: ROOT_START,
            root_end: ROOT_END,
            max_prime_attempts: MAX_PRIME_ATTEMPTS,
            seed: None,
        }
    }
}

impl ExchangeConfig {
    /// Default configuration with a different prime size.
    pub fn with_key_bits(key_bits: usize) -> Self {
        Self {
            key_bits,
            ..Self::default()
        }
    }

    /// Builder-style setter for the RNG seed.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the generators cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.key_bits < 32 {
            return Err(Error::InvalidConfig(format!(
                "key_bits must be at least 32, got {}",
                self.key_bits
            )));
        }
        if self.certainty == 0 {
            return Err(Error::InvalidConfig("certainty must be positive".into()));
        }
        if self.factor_limit < 3 {
            return Err(Error::InvalidConfig(format!(
                "factor_limit must be at least 3, got {}",
                self.factor_limit
            )));
        }
        if self.root_start < 2 {
            return Err(Error::InvalidConfig(format!(
                "root_start must be at least 2, got {}",
                self.root_start
            )));
        }
        if self.root_end <= self.root_start {
            return Err(Error::InvalidConfig(format!(
                "empty root search range [{}, {})",
                self.root_start, self.root_end
            )));
        }
        if self.max_prime_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_prime_attempts must be positive".into(),
            ));
        }
        Ok(())
    }

    /// RNG for the run: seeded when `seed` is set, OS entropy otherwise.
    pub fn rng(&self) -> ChaCha20Rng {
        match self.seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn test_default_matches_classic_constants() {
        let config = ExchangeConfig::default();
        assert_eq!(config.key_bits, 512);
        assert_eq!(config.certainty, 64);
        assert_eq!(config.factor_limit, 20_000);
        assert_eq!(config.root_start, 3);
        assert_eq!(config.root_end, 100_000_000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let too_small = ExchangeConfig::with_key_bits(16);
        assert!(matches!(too_small.validate(), Err(Error::InvalidConfig(_))));

        let empty_range = ExchangeConfig {
            root_start: 10,
            root_end: 10,
            ..ExchangeConfig::default()
        };
        assert!(matches!(empty_range.validate(), Err(Error::InvalidConfig(_))));

        let no_budget = ExchangeConfig {
            max_prime_attempts: 0,
            ..ExchangeConfig::default()
        };
        assert!(matches!(no_budget.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = ExchangeConfig::with_key_bits(64).seeded(7);
        let a = config.rng().next_u64();
        let b = config.rng().next_u64();
        assert_eq!(a, b);
    }
}
