//! # Cryptographic Helpers
//!
//! Signing is not done here: the signer receives the canonical bytes and
//! signs them with keys this crate never sees. The only cryptography the
//! transfer flow performs itself is sealing encrypted message payloads.

pub mod encryption;

pub use encryption::{EncryptionError, SealedBoxCipher};
