//! Relay state machine: routes each message directly between Alice and Bob, or through Eve.
//!
//! In `Intercepted` mode Alice and Bob each hold a perfectly valid key, just shared with
//! Eve instead of with each other. Nothing in the unauthenticated exchange lets them notice.

use std::fmt;

use log::{debug, info};
use rand_chacha::ChaCha20Rng;

use crate::config::ExchangeConfig;
use crate::error::{Error, Result};
use crate::security::{Party, PartyPair};
use crate::session::ExchangeSession;


/// How messages travel between Alice and Bob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelayMode {
    /// Alice and Bob share a channel.
    #[default]
    Direct,
    /// Every message goes through Eve, who decrypts and re-encrypts it.
    Intercepted,
}

impl RelayMode {
    pub fn toggled(self) -> Self {
        match self {
            RelayMode::Direct => RelayMode::Intercepted,
            RelayMode::Intercepted => RelayMode::Direct,
        }
    }
}

impl fmt::Display for RelayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayMode::Direct => f.write_str("direct"),
            RelayMode::Intercepted => f.write_str("intercepted"),
        }
    }
}

/// Whose plaintext is sent next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Turn {
    #[default]
    Alice,
    Bob,
}

impl Turn {
    pub fn sender(self) -> Party {
        match self {
            Turn::Alice => Party::Alice,
            Turn::Bob => Party::Bob,
        }
    }

    pub fn receiver(self) -> Party {
        self.flipped().sender()
    }

    pub fn flipped(self) -> Self {
        match self {
            Turn::Alice => Turn::Bob,
            Turn::Bob => Turn::Alice,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.sender(), f)
    }
}

/// One encrypt/decrypt leg of a message round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayHop {
    pub channel: PartyPair,
    pub from: Party,
    pub to: Party,
    pub ciphertext: Vec<u8>,
    /// Plaintext recovered by `to`.
    pub recovered: Vec<u8>,
}

impl RelayHop {
    pub fn ciphertext_hex(&self) -> String {
        hex::encode(&self.ciphertext)
    }

    pub fn recovered_text(&self) -> String {
        String::from_utf8_lossy(&self.recovered).into_owned()
    }
}

/// Everything produced while relaying one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTrace {
    pub epoch: u64,
    pub mode: RelayMode,
    pub sender: Party,
    pub receiver: Party,
    pub hops: Vec<RelayHop>,
}

impl RelayTrace {
    /// What the receiver ended up reading.
    pub fn delivered(&self) -> &[u8] {
        self.hops
            .last()
            .map(|hop| hop.recovered.as_slice())
            .unwrap_or_default()
    }

    /// What Eve read on the way, if the message passed through her.
    pub fn intercepted(&self) -> Option<&[u8]> {
        self.hops
            .iter()
            .find(|hop| hop.to == Party::Eve)
            .map(|hop| hop.recovered.as_slice())
    }
}

/// Owns the current epoch and drives renewal, mode changes and message rounds.
#[derive(Debug)]
pub struct RelayController {
    config: ExchangeConfig,
    rng: ChaCha20Rng,
    session: ExchangeSession,
    mode: RelayMode,
    turn: Turn,
    terminated: bool,
}

impl RelayController {
    /// Generate the first epoch from `config`.
    pub fn new(config: ExchangeConfig) -> Result<Self> {
        let mut rng = config.rng();
        let session = ExchangeSession::establish(&config, 1, &mut rng)?;
        Ok(Self::with_session(config, rng, session))
    }

    /// Start from an existing epoch, e.g. one built from fixed parameters.
    pub fn with_session(config: ExchangeConfig, rng: ChaCha20Rng, session: ExchangeSession) -> Self {
        Self {
            config,
            rng,
            session,
            mode: RelayMode::default(),
            turn: Turn::default(),
            terminated: false,
        }
    }

    pub fn mode(&self) -> RelayMode {
        self.mode
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn session(&self) -> &ExchangeSession {
        &self.session
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn ensure_running(&self) -> Result<()> {
        if self.terminated {
            Err(Error::SessionTerminated)
        } else {
            Ok(())
        }
    }

    /// Replace the whole epoch. On failure the previous epoch stays in place.
    pub fn initialize_or_renew(&mut self) -> Result<&ExchangeSession> {
        self.ensure_running()?;
        let epoch = self.session.epoch() + 1;
        let next = ExchangeSession::establish(&self.config, epoch, &mut self.rng)?;
        self.session = next;
        info!("keys renewed, now at epoch {}", epoch);
        Ok(&self.session)
    }

    pub fn toggle_relay_mode(&mut self) -> Result<RelayMode> {
        self.ensure_running()?;
        self.mode = self.mode.toggled();
        info!("relay mode is now {}", self.mode);
        Ok(self.mode)
    }

    /// Relay `plaintext` from the current speaker and hand the turn over.
    pub fn send(&mut self, plaintext: &[u8]) -> Result<RelayTrace> {
        self.ensure_running()?;
        let sender = self.turn.sender();
        let receiver = self.turn.receiver();

        let hops = match self.mode {
            RelayMode::Direct => vec![self.hop(sender, receiver, plaintext)?],
            RelayMode::Intercepted => {
                let first = self.hop(sender, Party::Eve, plaintext)?;
                let second = self.hop(Party::Eve, receiver, &first.recovered)?;
                vec![first, second]
            }
        };

        self.turn = self.turn.flipped();
        Ok(RelayTrace {
            epoch: self.session.epoch(),
            mode: self.mode,
            sender,
            receiver,
            hops,
        })
    }

    fn hop(&self, from: Party, to: Party, plaintext: &[u8]) -> Result<RelayHop> {
        let channel = PartyPair::new(from, to).ok_or_else(|| {
            Error::InvalidConfig(format!("{} cannot send a message to itself", from))
        })?;
        let cipher = self.session.channel(channel);
        let ciphertext = cipher.encrypt(plaintext);
        let recovered = cipher.decrypt(&ciphertext)?;
        debug!(
            "{} -> {} over {}: {} bytes of ciphertext",
            from,
            to,
            channel,
            ciphertext.len()
        );
        Ok(RelayHop {
            channel,
            from,
            to,
            ciphertext,
            recovered,
        })
    }

    /// End the session. Every later operation fails with `SessionTerminated`.
    pub fn terminate(&mut self) {
        if !self.terminated {
            info!("session terminated at epoch {}", self.session.epoch());
        }
        self.terminated = true;
    }
}
