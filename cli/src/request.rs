//! # Request Files
//!
//! The JSON form of a signing request as written by a host wallet. Keys are
//! hex strings and messages are text; both are turned into the protocol
//! types before the signing flow sees them.
//!
//! ```json
//! {
//!   "network": "testnet",
//!   "fee": 2000000,
//!   "transfer": {
//!     "recipient": "TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW",
//!     "amount": 2000000,
//!     "message": "hello",
//!     "mosaics": [{ "namespace": "nem", "mosaic": "xem", "quantity": 1 }]
//!   }
//! }
//! ```
//!
//! `timestamp` defaults to now and `deadline` to one hour after `timestamp`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

use nem_transfer::config::{nem_timestamp, PUBLIC_KEY_LENGTH};
use nem_transfer::transaction::{
    ImportanceTransfer, ImportanceTransferMode, Mosaic, Network, TransactionCommon,
    TransactionRequest, Transfer,
};

/// Seconds between `timestamp` and the default `deadline`.
pub const DEFAULT_DEADLINE_SECONDS: u32 = 60 * 60;

/// Top-level request file.
#[derive(Debug, Deserialize)]
pub struct RequestFile {
    pub network: Network,
    /// Seconds since the NEM epoch. Defaults to the current time.
    #[serde(default)]
    pub timestamp: Option<u32>,
    /// Network fee in micro-XEM.
    pub fee: u64,
    #[serde(default)]
    pub deadline: Option<u32>,
    #[serde(flatten)]
    pub body: RequestBody,
}

/// Exactly one transaction kind per file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestBody {
    Transfer(TransferFile),
    ImportanceTransfer(ImportanceTransferFile),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransferFile {
    pub recipient: String,
    pub amount: u64,
    /// Text message.
    #[serde(default)]
    pub message: Option<String>,
    /// Raw message bytes as hex, for messages that are not typed text.
    #[serde(default)]
    pub message_hex: Option<String>,
    /// Hex public key to seal the message for.
    #[serde(default)]
    pub encrypt_to: Option<String>,
    #[serde(default)]
    pub mosaics: Vec<Mosaic>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportanceTransferFile {
    pub mode: ImportanceTransferMode,
    /// Hex public key of the remote harvesting account.
    pub remote_key: String,
}

impl RequestFile {
    /// Reads and parses a request file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse request {}", path.display()))
    }

    /// Converts the file into protocol values, filling in default times
    /// relative to `now`.
    pub fn into_request(
        self,
        now: DateTime<Utc>,
    ) -> Result<(TransactionCommon, TransactionRequest)> {
        let timestamp = match self.timestamp {
            Some(ts) => ts,
            None => nem_timestamp(now)?,
        };
        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None => timestamp
                .checked_add(DEFAULT_DEADLINE_SECONDS)
                .context("timestamp too large for a default deadline")?,
        };

        let common = TransactionCommon {
            network: self.network,
            timestamp,
            fee: self.fee,
            deadline,
        };

        let request = match self.body {
            RequestBody::Transfer(t) => TransactionRequest::Transfer(t.into_transfer()?),
            RequestBody::ImportanceTransfer(imp) => {
                TransactionRequest::ImportanceTransfer(ImportanceTransfer {
                    mode: imp.mode,
                    public_key: parse_key(&imp.remote_key).context("invalid remote_key")?,
                })
            }
        };
        Ok((common, request))
    }
}

impl TransferFile {
    fn into_transfer(self) -> Result<Transfer> {
        let payload = match (self.message, self.message_hex) {
            (Some(_), Some(_)) => bail!("set either message or message_hex, not both"),
            (Some(text), None) => Some(text.into_bytes()),
            (None, Some(raw)) => Some(hex::decode(raw.trim()).context("invalid message_hex")?),
            (None, None) => None,
        };
        let public_key = self
            .encrypt_to
            .as_deref()
            .map(parse_key)
            .transpose()
            .context("invalid encrypt_to")?;

        Ok(Transfer {
            recipient: self.recipient,
            amount: self.amount,
            payload,
            public_key,
            mosaics: self.mosaics,
        })
    }
}

/// Decodes a 32-byte hex key.
pub fn parse_key(hex_key: &str) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
    let bytes = hex::decode(hex_key.trim()).context("key is not valid hex")?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("key must be {PUBLIC_KEY_LENGTH} bytes, got {len}"))
}
