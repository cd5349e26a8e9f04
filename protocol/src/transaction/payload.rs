//! Transfer message payload resolution.
//!
//! Decides whether a transfer carries no message, a plaintext message or an
//! encrypted one, and produces the exact bytes that go on the wire. An empty
//! payload is serialized as a zero-length field and skips the payload
//! confirmation entirely.

use tracing::debug;

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::encryption::EncryptionError;
use crate::error::TransactionError;

use super::types::Transfer;

/// Seals a message for a recipient.
pub trait PayloadCipher {
    /// Encrypts `plaintext` so that only the holder of the secret matching
    /// `recipient` can read it.
    fn encrypt(
        &self,
        recipient: &[u8; PUBLIC_KEY_LENGTH],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, EncryptionError>;
}

/// The payload as it will be serialized, plus what may be shown about it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPayload {
    /// Bytes written to the payload field.
    pub bytes: Vec<u8>,
    /// Whether `bytes` is a sealed message.
    pub encrypted: bool,
    /// The plaintext message, present only for unencrypted payloads.
    pub text: Option<String>,
}

impl ResolvedPayload {
    /// Returns `true` if the transfer carries no message.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Resolves the wire payload of `transfer`.
///
/// # Errors
///
/// - `MalformedInput` if a recipient key is given without a message, the
///   message is not valid UTF-8, or encryption is requested but no cipher
///   is available.
/// - `Encryption` if the cipher fails.
pub fn resolve_payload(
    transfer: &Transfer,
    cipher: Option<&dyn PayloadCipher>,
) -> Result<ResolvedPayload, TransactionError> {
    let plaintext = transfer.payload.as_deref().unwrap_or_default();

    if plaintext.is_empty() {
        if transfer.wants_encryption() {
            return Err(TransactionError::MalformedInput(
                "public key provided but no payload to encrypt".into(),
            ));
        }
        return Ok(ResolvedPayload::default());
    }

    let text = std::str::from_utf8(plaintext)
        .map_err(|e| TransactionError::MalformedInput(format!("payload is not valid UTF-8: {e}")))?;

    match transfer.public_key {
        Some(ref recipient) => {
            let cipher = cipher.ok_or_else(|| {
                TransactionError::MalformedInput(
                    "payload encryption requested but no encryption key is available".into(),
                )
            })?;
            let bytes = cipher.encrypt(recipient, plaintext)?;
            debug!(
                plaintext_len = plaintext.len(),
                sealed_len = bytes.len(),
                "payload sealed for recipient"
            );
            Ok(ResolvedPayload {
                bytes,
                encrypted: true,
                text: None,
            })
        }
        None => Ok(ResolvedPayload {
            bytes: plaintext.to_vec(),
            encrypted: false,
            text: Some(text.to_owned()),
        }),
    }
}
