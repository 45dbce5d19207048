//! DISCLAIMER: This is a toy, three-party Diffie-Hellman exchange in pure Rust.
//! It is *EXCLUSIVELY* for demonstration and educational purposes.
//! Absolutely DO NOT use it for real cryptographic or security-sensitive operations.
//! There is no authentication of public values, which is exactly what lets Eve sit in the
//! middle.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};
use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::{CryptoRng, Rng};

use crate::config::ExchangeConfig;
use crate::error::{Error, Result};
use crate::math::{PrimeFactorizer, PrimitiveRootFinder, SafePrimeGenerator};

/// Secrets are this many bits shorter than the prime.
pub const SECRET_BIT_MARGIN: usize = 16;

/// The three participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Party {
    Alice,
    Bob,
    Eve,
}

impl Party {
    pub const ALL: [Party; 3] = [Party::Alice, Party::Bob, Party::Eve];

    pub fn name(self) -> &'static str {
        match self {
            Party::Alice => "Alice",
            Party::Bob => "Bob",
            Party::Eve => "Eve",
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// An unordered pair of two distinct parties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartyPair {
    low: Party,
    high: Party,
}

impl PartyPair {
    pub const ALICE_BOB: PartyPair = PartyPair {
        low: Party::Alice,
        high: Party::Bob,
    };
    pub const ALICE_EVE: PartyPair = PartyPair {
        low: Party::Alice,
        high: Party::Eve,
    };
    pub const BOB_EVE: PartyPair = PartyPair {
        low: Party::Bob,
        high: Party::Eve,
    };

    pub const ALL: [PartyPair; 3] = [Self::ALICE_BOB, Self::ALICE_EVE, Self::BOB_EVE];

    /// `None` when both sides are the same party.
    pub fn new(a: Party, b: Party) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn parties(self) -> (Party, Party) {
        (self.low, self.high)
    }

    pub fn contains(self, party: Party) -> bool {
        self.low == party || self.high == party
    }
}

impl fmt::Display for PartyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Prime modulus and generator for one epoch.
///
/// *This is for demonstration only. DO NOT use in real systems.*
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeParameters {
    /// A safe prime modulus.
    pub prime: BigUint,
    /// The smallest primitive root of `prime` in the configured window.
    pub generator: BigUint,
}

impl PrimeParameters {
    /// Generate a safe prime of `config.key_bits` bits and locate its generator.
    pub fn generate<R: Rng + ?Sized>(config: &ExchangeConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let prime = SafePrimeGenerator::new(config.certainty, config.max_prime_attempts)
            .generate(config.key_bits, rng)?;
        debug!("prime: {}", prime);

        let finder = PrimitiveRootFinder::new(
            PrimeFactorizer::new(config.factor_limit, config.certainty),
            config.root_start,
            config.root_end,
        );
        let generator = finder.find_root(&prime)?;
        debug!("generator: {}", generator);

        Ok(Self { prime, generator })
    }
}

/// One party's private exponent and the public value derived from it.
#[derive(Clone, PartialEq, Eq)]
pub struct PartyKeys {
    secret: BigUint,
    public: BigUint,
}

impl PartyKeys {
    fn derive(params: &PrimeParameters, secret: BigUint) -> Self {
        let public = params.generator.modpow(&secret, &params.prime);
        Self { secret, public }
    }

    pub fn secret(&self) -> &BigUint {
        &self.secret
    }

    pub fn public(&self) -> &BigUint {
        &self.public
    }
}

impl fmt::Debug for PartyKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartyKeys")
            .field("secret", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Keep a pairwise value only when both directions produced the same number.
pub(crate) fn cross_check(forward: BigUint, backward: BigUint) -> Option<BigUint> {
    if forward == backward {
        Some(forward)
    } else {
        None
    }
}

/// Per-party keys and the pairwise shared secrets of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAgreement {
    keys: BTreeMap<Party, PartyKeys>,
    shared: BTreeMap<PartyPair, Option<BigUint>>,
}

impl KeyAgreement {
    pub fn keys(&self, party: Party) -> &PartyKeys {
        &self.keys[&party]
    }

    pub fn public(&self, party: Party) -> &BigUint {
        self.keys(party).public()
    }

    /// The agreed value for `pair`, or `AgreementError` if the cross-check failed.
    pub fn shared_secret(&self, pair: PartyPair) -> Result<&BigUint> {
        self.shared
            .get(&pair)
            .and_then(Option::as_ref)
            .ok_or(Error::AgreementError { pair })
    }

    /// Fail on the first pair whose shared secret is unset.
    pub fn verify(&self) -> Result<()> {
        for pair in PartyPair::ALL {
            self.shared_secret(pair)?;
        }
        Ok(())
    }
}

/// Runs the exchange for Alice, Bob and Eve over fixed parameters.
#[derive(Debug, Clone)]
pub struct KeyAgreementEngine<'a> {
    params: &'a PrimeParameters,
}

impl<'a> KeyAgreementEngine<'a> {
    pub fn new(params: &'a PrimeParameters) -> Self {
        Self { params }
    }

    /// Bit length of every drawn secret: `bits(p) - 16`, never below 2.
    pub fn secret_bits(&self) -> usize {
        self.params
            .prime
            .bits()
            .saturating_sub(SECRET_BIT_MARGIN)
            .max(2)
    }

    /// Draw a fresh secret for every party and compute all pairwise values.
    pub fn run_exchange<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> KeyAgreement {
        let bits = self.secret_bits();
        let [alice, bob, eve] = Party::ALL.map(|_| {
            let mut secret = BigUint::zero();
            while secret.is_zero() {
                secret = rng.gen_biguint(bits);
            }
            secret
        });
        self.run_with_secrets(alice, bob, eve)
    }

    /// Same as [`run_exchange`](Self::run_exchange) with caller-chosen secrets.
    pub fn run_with_secrets(&self, alice: BigUint, bob: BigUint, eve: BigUint) -> KeyAgreement {
        let params = self.params;
        let keys: BTreeMap<Party, PartyKeys> = [
            (Party::Alice, alice),
            (Party::Bob, bob),
            (Party::Eve, eve),
        ]
        .into_iter()
        .map(|(party, secret)| (party, PartyKeys::derive(params, secret)))
        .collect();
        for (party, k) in &keys {
            debug!("secret {}: {}", party, k.secret);
            debug!("public {}: {}", party, k.public);
        }

        let mut shared = BTreeMap::new();
        for pair in PartyPair::ALL {
            let (x, y) = pair.parties();
            let forward = keys[&y].public.modpow(&keys[&x].secret, &params.prime);
            let backward = keys[&x].public.modpow(&keys[&y].secret, &params.prime);
            let agreed = cross_check(forward, backward);
            match &agreed {
                Some(value) => debug!("shared {}: {}", pair, value),
                None => info!("shared {}: cross-check failed", pair),
            }
            shared.insert(pair, agreed);
        }

        KeyAgreement { keys, shared }
    }
}

#[cfg(test)]
impl KeyAgreement {
    pub(crate) fn with_unset(mut self, pair: PartyPair) -> Self {
        self.shared.insert(pair, None);
        self
    }
}
