//! # DH relay
//!
//! DISCLAIMER: This library is a toy example of Diffie-Hellman key agreement and a
//! man-in-the-middle relay. It is for educational purposes only and is not secure.
//! DO NOT use it for anything real.
//!
//! Alice, Bob and Eve agree on a safe prime and a generator, each picks a secret
//! exponent, and every pair derives an AES-128 key from its shared secret. Messages
//! between Alice and Bob travel either directly or through Eve, who reads and
//! re-encrypts them without either endpoint noticing.

pub mod command;
pub mod config;
pub mod error;
pub mod math;
pub mod relay;
pub mod security;
pub mod session;

pub use command::{confirms, Command};
pub use config::ExchangeConfig;
pub use error::{Error, Result};
pub use relay::{RelayController, RelayHop, RelayMode, RelayTrace, Turn};
pub use security::{Party, PartyPair, PrimeParameters, SymmetricKey};
pub use session::ExchangeSession;
