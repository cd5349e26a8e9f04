//! Transfer construction via the builder pattern.
//!
//! [`TransferBuilder`] assembles a [`Transfer`] request field by field. It
//! does no validation and no canonicalization: those happen inside the
//! signing flow so that a hand-built request and a decoded one go through
//! exactly the same checks.

use crate::config::PUBLIC_KEY_LENGTH;

use super::types::{Mosaic, Transfer};

/// Fluent builder for [`Transfer`] requests.
///
/// # Usage
///
/// ```
/// use nem_transfer::transaction::TransferBuilder;
///
/// let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
///     .amount(1_000_000)
///     .mosaic("nem", "xem", 2_500_000)
///     .message("thanks for lunch")
///     .build();
///
/// assert_eq!(transfer.mosaics.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TransferBuilder {
    recipient: String,
    amount: u64,
    payload: Option<Vec<u8>>,
    public_key: Option<[u8; PUBLIC_KEY_LENGTH]>,
    mosaics: Vec<Mosaic>,
}

impl TransferBuilder {
    /// Starts a transfer to `recipient` with a zero amount and no message.
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            amount: 0,
            payload: None,
            public_key: None,
            mosaics: Vec::new(),
        }
    }

    /// Sets the XEM amount, or the mosaic multiplier if mosaics are attached.
    pub fn amount(mut self, amount: u64) -> Self {
        self.amount = amount;
        self
    }

    /// Attaches raw message bytes.
    pub fn payload(mut self, data: Vec<u8>) -> Self {
        self.payload = Some(data);
        self
    }

    /// Attaches a text message.
    pub fn message(self, text: &str) -> Self {
        self.payload(text.as_bytes().to_vec())
    }

    /// Requests the message be sealed for `recipient_key`.
    pub fn encrypt_to(mut self, recipient_key: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        self.public_key = Some(recipient_key);
        self
    }

    /// Appends a mosaic attachment.
    pub fn mosaic(mut self, namespace: &str, mosaic: &str, quantity: u64) -> Self {
        self.mosaics.push(Mosaic::new(namespace, mosaic, quantity));
        self
    }

    /// Consumes the builder and produces the request.
    pub fn build(self) -> Transfer {
        Transfer {
            recipient: self.recipient,
            amount: self.amount,
            payload: self.payload,
            public_key: self.public_key,
            mosaics: self.mosaics,
        }
    }
}
