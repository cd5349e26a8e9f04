//! # Payload Sealing
//!
//! Encrypted transfer messages are sealed on the device before the user is
//! asked to confirm anything, so the bytes that end up in the transaction
//! are fixed by the time the prompts run.
//!
//! [`SealedBoxCipher`] is the cipher shipped with this crate:
//!
//! 1. X25519 agreement between the device's static secret and the
//!    recipient's public key.
//! 2. `key = SHA-256(salt || shared_secret)` with a fresh 32-byte salt per
//!    message.
//! 3. AES-256-GCM with a random 96-bit nonce.
//!
//! ## Wire format
//!
//! `salt (32) || nonce (12) || ciphertext || tag (16)`. The recipient needs
//! only its own secret and the sender's public key to [`SealedBoxCipher::open`]
//! the message.
//!
//! Hardware deployments that derive keys differently plug their own
//! [`PayloadCipher`] into the signer instead.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;
use x25519_dalek::{PublicKey, StaticSecret};

use crate::config::{AES_KEY_LENGTH, AES_NONCE_LENGTH, PAYLOAD_SALT_LENGTH, PUBLIC_KEY_LENGTH};
use crate::transaction::payload::PayloadCipher;

/// Errors that can occur during sealing or opening.
///
/// A wrong key and a corrupted ciphertext are reported identically.
#[derive(Debug, Error)]
pub enum EncryptionError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed -- wrong key or corrupted ciphertext")]
    DecryptFailed,

    #[error("recipient key does not yield a contributory shared secret")]
    InvalidRecipientKey,

    #[error("sealed payload too short: must be at least {} bytes", PAYLOAD_SALT_LENGTH + AES_NONCE_LENGTH)]
    CiphertextTooShort,
}

/// Encrypt plaintext with AES-256-GCM using a random nonce.
///
/// Returns `nonce || ciphertext`, where the ciphertext carries the 16-byte
/// GCM tag.
pub fn encrypt(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::EncryptFailed)?;

    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt data previously produced by [`encrypt`].
pub fn decrypt(key: &[u8; AES_KEY_LENGTH], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    if data.len() < AES_NONCE_LENGTH {
        return Err(EncryptionError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = data.split_at(AES_NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::DecryptFailed)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| EncryptionError::DecryptFailed)
}

/// Derives the per-message AES key from the salt and the X25519 agreement.
fn derive_key(
    secret: &StaticSecret,
    peer: &[u8; PUBLIC_KEY_LENGTH],
    salt: &[u8],
) -> Result<[u8; AES_KEY_LENGTH], EncryptionError> {
    let shared = secret.diffie_hellman(&PublicKey::from(*peer));
    if !shared.was_contributory() {
        return Err(EncryptionError::InvalidRecipientKey);
    }

    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(shared.as_bytes());
    Ok(hasher.finalize().into())
}

/// Seals payloads for a recipient with the device's static X25519 secret.
pub struct SealedBoxCipher {
    secret: StaticSecret,
}

impl SealedBoxCipher {
    /// Creates a cipher from raw secret bytes.
    pub fn from_secret_bytes(secret: [u8; 32]) -> Self {
        Self {
            secret: StaticSecret::from(secret),
        }
    }

    /// Creates a cipher with a freshly generated secret.
    pub fn generate() -> Self {
        Self {
            secret: StaticSecret::random_from_rng(OsRng),
        }
    }

    /// The public half of the device secret, needed by the recipient to open
    /// sealed payloads.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        PublicKey::from(&self.secret).to_bytes()
    }

    /// Opens a payload sealed by `sender` for the holder of this secret.
    pub fn open(
        &self,
        sender: &[u8; PUBLIC_KEY_LENGTH],
        sealed: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        if sealed.len() < PAYLOAD_SALT_LENGTH + AES_NONCE_LENGTH {
            return Err(EncryptionError::CiphertextTooShort);
        }
        let (salt, body) = sealed.split_at(PAYLOAD_SALT_LENGTH);
        let key = derive_key(&self.secret, sender, salt)?;
        decrypt(&key, body)
    }
}

impl PayloadCipher for SealedBoxCipher {
    fn encrypt(
        &self,
        recipient: &[u8; PUBLIC_KEY_LENGTH],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let mut salt = [0u8; PAYLOAD_SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        let key = derive_key(&self.secret, recipient, &salt)?;
        let body = encrypt(&key, plaintext)?;

        let mut out = Vec::with_capacity(PAYLOAD_SALT_LENGTH + body.len());
        out.extend_from_slice(&salt);
        out.extend_from_slice(&body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AES_TAG_LENGTH;

    fn test_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        for (i, byte) in key.iter_mut().enumerate() {
            *byte = i as u8;
        }
        key
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = test_key();
        let plaintext = b"the quick brown fox jumps over the lazy dog";

        let sealed = encrypt(&key, plaintext).unwrap();
        let recovered = decrypt(&key, &sealed).unwrap();
        assert_eq!(recovered, plaintext);
    }

    #[test]
    fn test_wrong_key_fails_decryption() {
        let key = test_key();
        let sealed = encrypt(&key, b"secret").unwrap();

        let mut wrong_key = test_key();
        wrong_key[0] ^= 0xFF;

        assert!(decrypt(&wrong_key, &sealed).is_err());
    }

    #[test]
    fn test_decrypt_too_short() {
        let key = test_key();
        assert!(matches!(
            decrypt(&key, &[0u8; 4]),
            Err(EncryptionError::CiphertextTooShort)
        ));
    }

    #[test]
    fn test_sealed_layout_length() {
        let sender = SealedBoxCipher::from_secret_bytes([7u8; 32]);
        let recipient = SealedBoxCipher::from_secret_bytes([9u8; 32]);
        let plaintext = b"dinner is on me";

        let sealed = sender.encrypt(&recipient.public_key(), plaintext).unwrap();
        assert_eq!(
            sealed.len(),
            PAYLOAD_SALT_LENGTH + AES_NONCE_LENGTH + plaintext.len() + AES_TAG_LENGTH
        );
    }

    #[test]
    fn test_recipient_opens_sealed_payload() {
        let sender = SealedBoxCipher::generate();
        let recipient = SealedBoxCipher::generate();

        let sealed = sender.encrypt(&recipient.public_key(), b"hello nem").unwrap();
        let opened = recipient.open(&sender.public_key(), &sealed).unwrap();
        assert_eq!(opened, b"hello nem");
    }

    #[test]
    fn test_third_party_cannot_open() {
        let sender = SealedBoxCipher::generate();
        let recipient = SealedBoxCipher::generate();
        let eve = SealedBoxCipher::generate();

        let sealed = sender.encrypt(&recipient.public_key(), b"hello nem").unwrap();
        assert!(eve.open(&sender.public_key(), &sealed).is_err());
    }

    #[test]
    fn test_fresh_salt_per_message() {
        let sender = SealedBoxCipher::generate();
        let recipient = SealedBoxCipher::generate().public_key();

        let a = sender.encrypt(&recipient, b"same").unwrap();
        let b = sender.encrypt(&recipient, b"same").unwrap();
        assert_ne!(&a[..PAYLOAD_SALT_LENGTH], &b[..PAYLOAD_SALT_LENGTH]);
    }

    #[test]
    fn test_low_order_recipient_key_rejected() {
        let sender = SealedBoxCipher::generate();
        assert!(matches!(
            sender.encrypt(&[0u8; 32], b"x"),
            Err(EncryptionError::InvalidRecipientKey)
        ));
    }
}
