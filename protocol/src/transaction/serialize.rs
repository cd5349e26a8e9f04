//! NEM binary transaction serialization.
//!
//! Layout of every transaction, all integers little-endian and every byte
//! string prefixed with its `u32` length:
//!
//! ```text
//! u32  type                 0x0101 transfer, 0x0801 importance transfer
//! u32  version              network << 24 | (1 or 2)
//! u32  timestamp
//! u32  32, [u8; 32]         signer public key
//! u64  fee
//! u32  deadline
//! ...  kind-specific fields
//! ```
//!
//! Transfer fields:
//!
//! ```text
//! u32  40, [u8; 40]         recipient address
//! u64  amount
//! u32  0                                        when there is no message
//! u32  len+8, u32 type, u32 len, [u8; len]      otherwise
//! u32  mosaic count                             version 2 only
//! per mosaic:
//!   u32 entry_len
//!     u32 id_len
//!       u32 len, namespace
//!       u32 len, mosaic name
//!     u64 quantity
//! ```
//!
//! Importance-transfer fields: `u32 mode, u32 32, [u8; 32] remote key`.
//!
//! Serialization builds into a fresh buffer and either returns all of it or
//! returns an error and drops it.

use tracing::debug;

use crate::config::{
    PAYLOAD_TYPE_ENCRYPTED, PAYLOAD_TYPE_PLAIN, PUBLIC_KEY_LENGTH,
    TRANSACTION_TYPE_IMPORTANCE_TRANSFER, TRANSACTION_TYPE_TRANSFER, TRANSACTION_VERSION_1,
    TRANSACTION_VERSION_2,
};
use crate::error::TransactionError;

use super::payload::ResolvedPayload;
use super::types::{ImportanceTransfer, Mosaic, Network, TransactionCommon, Transfer};

// ---------------------------------------------------------------------------
// WireWriter
// ---------------------------------------------------------------------------

/// Append-only little-endian writer for NEM wire fields.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a `u32` length prefix followed by `bytes`.
    pub fn write_bytes_with_len(&mut self, bytes: &[u8]) -> Result<(), TransactionError> {
        self.write_u32(wire_len(bytes.len(), "length prefix")?);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

fn wire_len(len: usize, field: &'static str) -> Result<u32, TransactionError> {
    u32::try_from(len).map_err(|_| TransactionError::EncodingOverflow { field })
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Version field: network byte in the top eight bits, format version below.
pub fn transaction_version(network: Network, version: u32) -> u32 {
    (u32::from(network.id()) << 24) | version
}

/// Writes the header shared by every transaction kind.
pub fn serialize_common(
    w: &mut WireWriter,
    common: &TransactionCommon,
    signer: &[u8; PUBLIC_KEY_LENGTH],
    transaction_type: u32,
    version: u32,
) -> Result<(), TransactionError> {
    w.write_u32(transaction_type);
    w.write_u32(transaction_version(common.network, version));
    w.write_u32(common.timestamp);
    w.write_bytes_with_len(signer)?;
    w.write_u64(common.fee);
    w.write_u32(common.deadline);
    Ok(())
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// Serializes a transfer whose mosaics are already canonical and whose
/// payload is already resolved.
pub fn serialize_transfer(
    common: &TransactionCommon,
    transfer: &Transfer,
    signer: &[u8; PUBLIC_KEY_LENGTH],
    payload: &ResolvedPayload,
) -> Result<Vec<u8>, TransactionError> {
    let version = if transfer.mosaics.is_empty() {
        TRANSACTION_VERSION_1
    } else {
        TRANSACTION_VERSION_2
    };

    let mut w = WireWriter::new();
    serialize_common(&mut w, common, signer, TRANSACTION_TYPE_TRANSFER, version)?;

    w.write_bytes_with_len(transfer.recipient.as_bytes())?;
    w.write_u64(transfer.amount);
    serialize_payload(&mut w, payload)?;

    if !transfer.mosaics.is_empty() {
        w.write_u32(wire_len(transfer.mosaics.len(), "mosaic count")?);
        for mosaic in &transfer.mosaics {
            serialize_mosaic(&mut w, mosaic)?;
        }
    }

    debug!(
        len = w.len(),
        version,
        mosaics = transfer.mosaics.len(),
        encrypted = payload.encrypted,
        "transfer serialized"
    );
    Ok(w.into_bytes())
}

fn serialize_payload(w: &mut WireWriter, payload: &ResolvedPayload) -> Result<(), TransactionError> {
    if payload.is_empty() {
        w.write_u32(0);
        return Ok(());
    }

    let len = wire_len(payload.bytes.len(), "payload length")?;
    let field_len = len
        .checked_add(8)
        .ok_or(TransactionError::EncodingOverflow {
            field: "payload length",
        })?;
    w.write_u32(field_len);
    w.write_u32(if payload.encrypted {
        PAYLOAD_TYPE_ENCRYPTED
    } else {
        PAYLOAD_TYPE_PLAIN
    });
    w.write_u32(len);
    w.buf.extend_from_slice(&payload.bytes);
    Ok(())
}

/// Writes one mosaic attachment.
pub fn serialize_mosaic(w: &mut WireWriter, mosaic: &Mosaic) -> Result<(), TransactionError> {
    let mut id = WireWriter::with_capacity(8 + mosaic.namespace.len() + mosaic.mosaic.len());
    id.write_bytes_with_len(mosaic.namespace.as_bytes())?;
    id.write_bytes_with_len(mosaic.mosaic.as_bytes())?;

    let mut entry = WireWriter::with_capacity(4 + id.len() + 8);
    entry.write_bytes_with_len(&id.into_bytes())?;
    entry.write_u64(mosaic.quantity);

    w.write_bytes_with_len(&entry.into_bytes())
}

// ---------------------------------------------------------------------------
// Importance transfer
// ---------------------------------------------------------------------------

/// Serializes an importance transfer.
pub fn serialize_importance_transfer(
    common: &TransactionCommon,
    imp: &ImportanceTransfer,
    signer: &[u8; PUBLIC_KEY_LENGTH],
) -> Result<Vec<u8>, TransactionError> {
    let mut w = WireWriter::new();
    serialize_common(
        &mut w,
        common,
        signer,
        TRANSACTION_TYPE_IMPORTANCE_TRANSFER,
        TRANSACTION_VERSION_1,
    )?;
    w.write_u32(imp.mode.wire_value());
    w.write_bytes_with_len(&imp.public_key)?;

    debug!(len = w.len(), mode = %imp.mode, "importance transfer serialized");
    Ok(w.into_bytes())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
