//! AES-128 in ECB mode with PKCS#7 padding, bound to one session key.
//!
//! ECB enciphers every block on its own, so equal plaintext blocks give equal ciphertext
//! blocks. That leak is the point of this demo and must stay visible.

use log::trace;

use super::aes::{Aes128, AES128_KEY_SIZE, AES_BLOCK_SIZE};
use super::kdf::SymmetricKey;
use crate::error::{Error, Result};

/// Encrypt/decrypt operations for one channel.
#[derive(Debug, Clone)]
pub struct CipherSession {
    key: SymmetricKey,
    cipher: Aes128,
}

impl CipherSession {
    /// Build a session from raw key bytes; the length must be exactly 16.
    pub fn new(key: &[u8]) -> Result<Self> {
        let cipher = Aes128::new(key)?;
        let mut bytes = [0u8; AES128_KEY_SIZE];
        bytes.copy_from_slice(key);
        Ok(Self {
            key: SymmetricKey::from_bytes(bytes),
            cipher,
        })
    }

    pub fn from_key(key: SymmetricKey) -> Self {
        Self {
            cipher: Aes128::from_key_array(key.as_bytes()),
            key,
        }
    }

    pub fn key(&self) -> &SymmetricKey {
        &self.key
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        let mut data = pkcs7_pad(plaintext);
        let mut block = [0u8; AES_BLOCK_SIZE];
        for chunk in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            block.copy_from_slice(chunk);
            self.cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        trace!("encrypted {} bytes into {} bytes", plaintext.len(), data.len());
        data
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::CipherFault(format!(
                "ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                AES_BLOCK_SIZE
            )));
        }
        let mut data = ciphertext.to_vec();
        let mut block = [0u8; AES_BLOCK_SIZE];
        for chunk in data.chunks_exact_mut(AES_BLOCK_SIZE) {
            block.copy_from_slice(chunk);
            self.cipher.decrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        pkcs7_unpad(&mut data)?;
        Ok(data)
    }
}

/// Append PKCS#7 padding. Block-aligned input gets a whole extra block.
pub fn pkcs7_pad(data: &[u8]) -> Vec<u8> {
    let pad = AES_BLOCK_SIZE - data.len() % AES_BLOCK_SIZE;
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strip and check PKCS#7 padding in place.
pub fn pkcs7_unpad(data: &mut Vec<u8>) -> Result<()> {
    let pad = match data.last() {
        Some(&b) => b as usize,
        None => return Err(Error::CipherFault("empty padded buffer".into())),
    };
    if pad == 0 || pad > AES_BLOCK_SIZE || pad > data.len() {
        return Err(Error::CipherFault(format!("invalid padding byte {}", pad)));
    }
    if data[data.len() - pad..].iter().any(|&b| b as usize != pad) {
        return Err(Error::CipherFault("inconsistent padding".into()));
    }
    data.truncate(data.len() - pad);
    Ok(())
}
