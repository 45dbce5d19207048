//! One epoch of the exchange: parameters, party keys, derived keys and channel ciphers.

use std::collections::BTreeMap;

use log::info;
use rand::{CryptoRng, Rng};

use crate::config::ExchangeConfig;
use crate::error::Result;
use crate::security::{
    derive_session_key, CipherSession, KeyAgreement, KeyAgreementEngine, PartyPair,
    PrimeParameters, SymmetricKey,
};

/// Everything derived during one epoch. Never mutated; renewal builds a new one.
#[derive(Debug, Clone)]
pub struct ExchangeSession {
    epoch: u64,
    params: PrimeParameters,
    agreement: KeyAgreement,
    channels: BTreeMap<PartyPair, CipherSession>,
}

impl ExchangeSession {
    /// Generate parameters, run the agreement and set up all three channels, in that order.
    pub fn establish<R: Rng + CryptoRng + ?Sized>(
        config: &ExchangeConfig,
        epoch: u64,
        rng: &mut R,
    ) -> Result<Self> {
        let params = PrimeParameters::generate(config, rng)?;
        let agreement = KeyAgreementEngine::new(&params).run_exchange(rng);
        Self::from_parts(epoch, params, agreement)
    }

    /// Finish an epoch from already computed parameters and agreement.
    ///
    /// Fails with `AgreementError` before any cipher is built if a pair is unset.
    pub fn from_parts(
        epoch: u64,
        params: PrimeParameters,
        agreement: KeyAgreement,
    ) -> Result<Self> {
        agreement.verify()?;

        let mut channels = BTreeMap::new();
        for pair in PartyPair::ALL {
            let key = derive_session_key(agreement.shared_secret(pair)?);
            channels.insert(pair, CipherSession::from_key(key));
        }
        info!(
            "epoch {} established over a {}-bit prime",
            epoch,
            params.prime.bits()
        );

        Ok(Self {
            epoch,
            params,
            agreement,
            channels,
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn params(&self) -> &PrimeParameters {
        &self.params
    }

    pub fn agreement(&self) -> &KeyAgreement {
        &self.agreement
    }

    pub fn channel(&self, pair: PartyPair) -> &CipherSession {
        &self.channels[&pair]
    }

    pub fn key(&self, pair: PartyPair) -> &SymmetricKey {
        self.channel(pair).key()
    }
}
