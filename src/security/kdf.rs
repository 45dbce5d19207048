//! Session-key derivation: SHA-256 over the decimal form of a shared secret, cut to 16 bytes.
//!
//! *This is for demonstration only.* A real protocol would use a proper KDF (e.g. HKDF) with
//! domain separation instead of hashing the bare integer text.

use std::fmt;

use num_bigint_dig::BigUint;
use sha2::{Digest, Sha256};

use super::aes::AES128_KEY_SIZE;

/// A 128-bit symmetric key derived from one shared secret.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetricKey([u8; AES128_KEY_SIZE]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; AES128_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES128_KEY_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey({})", self.to_hex())
    }
}

/// Derive the session key for `shared_secret`. Deterministic.
pub fn derive_session_key(shared_secret: &BigUint) -> SymmetricKey {
    let digest = Sha256::digest(shared_secret.to_str_radix(10).as_bytes());
    let mut key = [0u8; AES128_KEY_SIZE];
    key.copy_from_slice(&digest[..AES128_KEY_SIZE]);
    SymmetricKey(key)
}
