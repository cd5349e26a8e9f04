//! Core type definitions for NEM transfer requests.
//!
//! These are the already-decoded request values handed over by the message
//! layer. They are built fresh per request and never mutated by the codec.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{
    NATIVE_MOSAIC, NATIVE_NAMESPACE, NETWORK_ID_MAINNET, NETWORK_ID_MIJIN, NETWORK_ID_TESTNET,
    PUBLIC_KEY_LENGTH,
};
use crate::error::TransactionError;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The NEM network a transaction is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Mijin,
}

impl Network {
    /// The network byte placed in the top eight bits of the version field.
    pub fn id(self) -> u8 {
        match self {
            Self::Mainnet => NETWORK_ID_MAINNET,
            Self::Testnet => NETWORK_ID_TESTNET,
            Self::Mijin => NETWORK_ID_MIJIN,
        }
    }

    /// First character of every address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            Self::Mainnet => 'N',
            Self::Testnet => 'T',
            Self::Mijin => 'M',
        }
    }
}

impl TryFrom<u8> for Network {
    type Error = TransactionError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            NETWORK_ID_MAINNET => Ok(Self::Mainnet),
            NETWORK_ID_TESTNET => Ok(Self::Testnet),
            NETWORK_ID_MIJIN => Ok(Self::Mijin),
            other => Err(TransactionError::MalformedInput(format!(
                "unknown network 0x{other:02X}"
            ))),
        }
    }
}

impl FromStr for Network {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "mijin" => Ok(Self::Mijin),
            other => Err(TransactionError::MalformedInput(format!(
                "unknown network {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => write!(f, "mainnet"),
            Self::Testnet => write!(f, "testnet"),
            Self::Mijin => write!(f, "mijin"),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionCommon
// ---------------------------------------------------------------------------

/// Header fields shared by every transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCommon {
    pub network: Network,
    /// Seconds since the NEM epoch.
    pub timestamp: u32,
    /// Network fee in micro-XEM.
    pub fee: u64,
    /// Seconds since the NEM epoch after which the transaction is void.
    pub deadline: u32,
}

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

/// A quantity of a named sub-asset attached to a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub namespace: String,
    pub mosaic: String,
    /// Raw quantity, before the transfer amount multiplier is applied.
    pub quantity: u64,
}

impl Mosaic {
    pub fn new(namespace: impl Into<String>, mosaic: impl Into<String>, quantity: u64) -> Self {
        Self {
            namespace: namespace.into(),
            mosaic: mosaic.into(),
            quantity,
        }
    }

    /// Returns `true` for `nem.xem`.
    pub fn is_native(&self) -> bool {
        is_native_mosaic(&self.namespace, &self.mosaic)
    }

    /// Fully qualified `namespace.mosaic` identifier.
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.namespace, self.mosaic)
    }
}

/// Returns `true` if the pair names the native asset.
pub fn is_native_mosaic(namespace: &str, mosaic: &str) -> bool {
    namespace == NATIVE_NAMESPACE && mosaic == NATIVE_MOSAIC
}

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

/// A value transfer, optionally carrying a message and mosaics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Base32 address of the recipient.
    pub recipient: String,
    /// XEM amount when `mosaics` is empty, otherwise the mosaic multiplier.
    pub amount: u64,
    /// Message bytes. Must be valid UTF-8.
    #[serde(default)]
    pub payload: Option<Vec<u8>>,
    /// When set, the payload is sealed to this key before serialization.
    #[serde(default)]
    pub public_key: Option<[u8; PUBLIC_KEY_LENGTH]>,
    #[serde(default)]
    pub mosaics: Vec<Mosaic>,
}

impl Transfer {
    /// Returns `true` if the payload must be encrypted.
    pub fn wants_encryption(&self) -> bool {
        self.public_key.is_some()
    }
}

// ---------------------------------------------------------------------------
// ImportanceTransfer
// ---------------------------------------------------------------------------

/// Whether remote harvesting is being delegated or revoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTransferMode {
    Activate,
    Deactivate,
}

impl ImportanceTransferMode {
    /// Value of the mode field on the wire.
    pub fn wire_value(self) -> u32 {
        match self {
            Self::Activate => 1,
            Self::Deactivate => 2,
        }
    }
}

impl fmt::Display for ImportanceTransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activate => write!(f, "Activate"),
            Self::Deactivate => write!(f, "Deactivate"),
        }
    }
}

/// Delegation of harvesting rights to a remote account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportanceTransfer {
    pub mode: ImportanceTransferMode,
    /// Public key of the remote harvesting account.
    pub public_key: [u8; PUBLIC_KEY_LENGTH],
}

// ---------------------------------------------------------------------------
// TransactionRequest
// ---------------------------------------------------------------------------

/// The kind-specific part of a signing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionRequest {
    Transfer(Transfer),
    ImportanceTransfer(ImportanceTransfer),
}

impl fmt::Display for TransactionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer(_) => write!(f, "Transfer"),
            Self::ImportanceTransfer(_) => write!(f, "ImportanceTransfer"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
