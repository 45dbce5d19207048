pub mod aes;
pub mod cipher;
pub mod diffie_hellman;
pub mod kdf;

// Re-export the AES block primitive
pub use aes::{Aes128, AES128_KEY_SIZE, AES_BLOCK_SIZE};

// Re-export the ECB session layer
pub use cipher::{pkcs7_pad, pkcs7_unpad, CipherSession};

// Re-export Diffie-Hellman functionality
pub use diffie_hellman::{
    KeyAgreement, KeyAgreementEngine, Party, PartyKeys, PartyPair, PrimeParameters,
    SECRET_BIT_MARGIN,
};

// Re-export key derivation
pub use kdf::{derive_session_key, SymmetricKey};
