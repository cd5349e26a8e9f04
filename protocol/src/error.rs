//! Error types for the transfer signing flow.
//!
//! Every operation that can fail returns a [`TransactionError`]. None of
//! them is retried internally, and no variant carries a partially built
//! buffer: whatever was serialized so far is dropped with the error.

use std::fmt;

use thiserror::Error;

use crate::crypto::encryption::EncryptionError;

/// The confirmation step at which the user declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmStep {
    /// Message payload review.
    Payload,
    /// Transfer of a known mosaic.
    Mosaic,
    /// Levy charged on a known mosaic.
    MosaicLevy,
    /// "Unknown mosaic" warning.
    UnknownMosaic,
    /// Raw-unit transfer of an unknown mosaic.
    UnknownMosaicTransfer,
    /// Recipient and XEM total.
    Transfer,
    /// Remote harvesting activation or deactivation.
    ImportanceMode,
    /// Final network fee.
    Fee,
}

impl fmt::Display for ConfirmStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload => write!(f, "payload"),
            Self::Mosaic => write!(f, "mosaic"),
            Self::MosaicLevy => write!(f, "mosaic levy"),
            Self::UnknownMosaic => write!(f, "unknown mosaic"),
            Self::UnknownMosaicTransfer => write!(f, "unknown mosaic transfer"),
            Self::Transfer => write!(f, "transfer"),
            Self::ImportanceMode => write!(f, "importance transfer mode"),
            Self::Fee => write!(f, "fee"),
        }
    }
}

/// Errors that can occur while confirming and serializing a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The user declined one of the confirmation prompts.
    #[error("user rejected the {0} confirmation")]
    UserRejected(ConfirmStep),

    /// A numeric value does not fit the width of its wire field.
    #[error("{field} does not fit its wire field")]
    EncodingOverflow {
        /// Name of the offending field.
        field: &'static str,
    },

    /// The request is not acceptable for this transaction kind.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Sealing the payload for the recipient failed.
    #[error("payload encryption failed: {0}")]
    Encryption(#[from] EncryptionError),
}

impl TransactionError {
    /// Returns `true` if the user, not the input, stopped the transaction.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::UserRejected(_))
    }
}
