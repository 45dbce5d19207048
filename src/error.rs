//! Error taxonomy shared by every stage of the exchange.

use num_bigint_dig::BigUint;
use thiserror::Error;

use crate::security::diffie_hellman::PartyPair;

/// Errors raised by parameter generation, key agreement, the cipher layer and the relay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Safe-prime sampling ran out of its retry budget.
    #[error("no safe prime of {bits} bits found after {attempts} attempts")]
    PrimeGenerationTimeout { bits: usize, attempts: usize },

    /// No primitive root exists in the configured search window.
    #[error("no primitive root of {prime} found in [{start}, {end})")]
    RootNotFound {
        prime: BigUint,
        start: u64,
        end: u64,
    },

    /// The two independent computations of a pairwise shared secret disagree.
    #[error("shared secret for {pair} failed the cross-check")]
    AgreementError { pair: PartyPair },

    /// Encryption or decryption was handed a key or input it cannot process.
    #[error("cipher fault: {0}")]
    CipherFault(String),

    /// A configuration value is outside the range the exchange can work with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The relay was already terminated.
    #[error("session has been terminated")]
    SessionTerminated,
}

pub type Result<T> = std::result::Result<T, Error>;
