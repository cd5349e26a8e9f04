//! # Protocol Configuration & Constants
//!
//! Every consensus-level number the codec depends on lives here. These are
//! not ours to choose: they come from the NEM (NIS1) transaction format, and
//! a single wrong value produces a transaction with a different hash.
//!
//! The only tunable knobs are collected in [`SignerConfig`], which controls
//! local policy (what the device accepts), never what goes on the wire.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Mainnet network byte. Addresses start with `N`.
pub const NETWORK_ID_MAINNET: u8 = 0x68;

/// Testnet network byte. Addresses start with `T`.
pub const NETWORK_ID_TESTNET: u8 = 0x98;

/// Mijin (private chain) network byte. Addresses start with `M`.
pub const NETWORK_ID_MIJIN: u8 = 0x60;

// ---------------------------------------------------------------------------
// Transaction Types & Versions
// ---------------------------------------------------------------------------

/// Type tag of a transfer transaction.
pub const TRANSACTION_TYPE_TRANSFER: u32 = 0x0101;

/// Type tag of an importance-transfer (remote harvesting) transaction.
pub const TRANSACTION_TYPE_IMPORTANCE_TRANSFER: u32 = 0x0801;

/// Version of every transaction that carries no mosaics.
pub const TRANSACTION_VERSION_1: u32 = 1;

/// Transfer version that carries the mosaic attachment list.
pub const TRANSACTION_VERSION_2: u32 = 2;

/// Payload type tag for a plaintext message.
pub const PAYLOAD_TYPE_PLAIN: u32 = 0x01;

/// Payload type tag for an encrypted message.
pub const PAYLOAD_TYPE_ENCRYPTED: u32 = 0x02;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// When a transfer carries mosaics, its `amount` is a multiplier expressed in
/// millionths: the transferred quantity of each mosaic is
/// `quantity * amount / MOSAIC_AMOUNT_DIVISOR`.
pub const MOSAIC_AMOUNT_DIVISOR: u64 = 1_000_000;

/// Percentile levies are expressed per ten thousand of the transferred
/// quantity.
pub const LEVY_PERCENTILE_DIVISOR: u64 = 10_000;

/// Divisibility of XEM. Totals and fees are always displayed with it.
pub const MAX_DIVISIBILITY: u32 = 6;

/// Namespace of the native asset.
pub const NATIVE_NAMESPACE: &str = "nem";

/// Mosaic name of the native asset.
pub const NATIVE_MOSAIC: &str = "xem";

/// Ticker shown next to native-asset amounts.
pub const NATIVE_TICKER: &str = "XEM";

// ---------------------------------------------------------------------------
// Sizes
// ---------------------------------------------------------------------------

/// Ed25519 public key length, for both the signer and the remote account.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a base32 NEM address without dashes.
pub const ADDRESS_LENGTH: usize = 40;

/// Random salt prepended to every sealed payload.
pub const PAYLOAD_SALT_LENGTH: usize = 32;

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// NEM timestamps count seconds from 2015-03-29T00:06:25Z.
pub const NEM_EPOCH_UNIX_SECONDS: i64 = 1_427_587_585;

/// Converts a wall-clock instant into a NEM network timestamp.
///
/// Instants before the NEM epoch, or so far in the future that the
/// timestamp no longer fits the 32-bit wire field, are rejected.
pub fn nem_timestamp(at: DateTime<Utc>) -> Result<u32, TransactionError> {
    let seconds = at.timestamp() - NEM_EPOCH_UNIX_SECONDS;
    if seconds < 0 {
        return Err(TransactionError::MalformedInput(format!(
            "{at} precedes the NEM epoch"
        )));
    }
    u32::try_from(seconds).map_err(|_| TransactionError::EncodingOverflow { field: "timestamp" })
}

/// The NEM epoch as a `DateTime`.
pub fn nem_epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(NEM_EPOCH_UNIX_SECONDS, 0)
        .single()
        .unwrap_or_default()
}

/// Returns a friendly name for a network byte, mainly for logging.
pub fn network_name(network_id: u8) -> String {
    match network_id {
        NETWORK_ID_MAINNET => "mainnet".to_string(),
        NETWORK_ID_TESTNET => "testnet".to_string(),
        NETWORK_ID_MIJIN => "mijin".to_string(),
        other => format!("unknown(0x{:02X})", other),
    }
}

// ---------------------------------------------------------------------------
// Signer Policy
// ---------------------------------------------------------------------------

/// What to do when a transfer lists the same mosaic more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the transaction. A duplicated entry usually means the host
    /// built the request wrong, and the user would be asked to confirm the
    /// same mosaic twice.
    #[default]
    Reject,
    /// Sum the quantities of duplicated entries into one.
    Merge,
}

/// Local policy for the signing flow.
///
/// Nothing here changes the wire format; it only decides which requests
/// the device is willing to build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Handling of duplicated mosaic entries.
    pub duplicate_mosaics: DuplicatePolicy,
}

impl SignerConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(json)
            .map_err(|e| TransactionError::MalformedInput(format!("invalid signer config: {e}")))
    }
}
