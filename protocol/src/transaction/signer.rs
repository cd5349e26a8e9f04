//! The end-to-end flow for one signing request.
//!
//! ```text
//! validate → canonicalize mosaics → resolve payload → confirm → serialize
//! ```
//!
//! Every step either succeeds or aborts the whole request. The returned
//! bytes are the unsigned transaction; signing them is the caller's job.

use tracing::info;

use crate::config::{SignerConfig, PUBLIC_KEY_LENGTH};
use crate::confirm::{confirm_importance_transfer, confirm_transfer, ConfirmationUi};
use crate::error::TransactionError;
use crate::mosaic::{canonicalize_mosaics, MosaicLookup};

use super::payload::{resolve_payload, PayloadCipher};
use super::serialize::{serialize_importance_transfer, serialize_transfer};
use super::types::{ImportanceTransfer, TransactionCommon, TransactionRequest, Transfer};
use super::validation::{validate_common, validate_transfer};

/// Builds confirmed, canonical transaction bytes for one signer.
///
/// The collaborators are borrowed: the definition table is shared
/// read-only reference data and the cipher belongs to the key store.
pub struct TransactionSigner<'a> {
    signer: [u8; PUBLIC_KEY_LENGTH],
    lookup: &'a dyn MosaicLookup,
    cipher: Option<&'a dyn PayloadCipher>,
    config: SignerConfig,
}

impl<'a> TransactionSigner<'a> {
    /// Creates a signer for `signer_public_key` without payload encryption.
    pub fn new(signer_public_key: [u8; PUBLIC_KEY_LENGTH], lookup: &'a dyn MosaicLookup) -> Self {
        Self {
            signer: signer_public_key,
            lookup,
            cipher: None,
            config: SignerConfig::default(),
        }
    }

    /// Enables encrypted payloads.
    pub fn with_cipher(mut self, cipher: &'a dyn PayloadCipher) -> Self {
        self.cipher = Some(cipher);
        self
    }

    /// Replaces the default signer policy.
    pub fn with_config(mut self, config: SignerConfig) -> Self {
        self.config = config;
        self
    }

    /// The signer public key written into every header.
    pub fn signer_public_key(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.signer
    }

    /// Dispatches on the request kind.
    pub fn sign_request(
        &self,
        ui: &mut dyn ConfirmationUi,
        common: &TransactionCommon,
        request: &TransactionRequest,
    ) -> Result<Vec<u8>, TransactionError> {
        match request {
            TransactionRequest::Transfer(transfer) => self.transfer(ui, common, transfer),
            TransactionRequest::ImportanceTransfer(imp) => {
                self.importance_transfer(ui, common, imp)
            }
        }
    }

    /// Confirms and serializes a transfer.
    ///
    /// The caller's `transfer` is not modified; the canonical mosaic list
    /// lives in a private copy.
    pub fn transfer(
        &self,
        ui: &mut dyn ConfirmationUi,
        common: &TransactionCommon,
        transfer: &Transfer,
    ) -> Result<Vec<u8>, TransactionError> {
        validate_transfer(common, transfer)?;

        let canonical = Transfer {
            mosaics: canonicalize_mosaics(&transfer.mosaics, self.config.duplicate_mosaics)?,
            ..transfer.clone()
        };
        let payload = resolve_payload(&canonical, self.cipher)?;

        confirm_transfer(ui, self.lookup, common, &canonical, &payload)?;

        let bytes = serialize_transfer(common, &canonical, &self.signer, &payload)?;
        info!(
            network = %common.network,
            mosaics = canonical.mosaics.len(),
            encrypted = payload.encrypted,
            len = bytes.len(),
            "transfer ready for signing"
        );
        Ok(bytes)
    }

    /// Confirms and serializes an importance transfer.
    pub fn importance_transfer(
        &self,
        ui: &mut dyn ConfirmationUi,
        common: &TransactionCommon,
        imp: &ImportanceTransfer,
    ) -> Result<Vec<u8>, TransactionError> {
        validate_common(common)?;
        confirm_importance_transfer(ui, common, imp)?;

        let bytes = serialize_importance_transfer(common, imp, &self.signer)?;
        info!(
            network = %common.network,
            mode = %imp.mode,
            len = bytes.len(),
            "importance transfer ready for signing"
        );
        Ok(bytes)
    }
}
