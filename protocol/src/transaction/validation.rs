//! Request checks that run before any prompt is shown.
//!
//! The message decoder already guarantees field presence and types. What is
//! checked here is whether the values make sense for the target network:
//! a transfer to a mainnet address on testnet would be signed happily and
//! then rejected by every node.

use crate::config::ADDRESS_LENGTH;
use crate::error::TransactionError;

use super::types::{Network, TransactionCommon, Transfer};

/// Checks the shared header fields.
pub fn validate_common(common: &TransactionCommon) -> Result<(), TransactionError> {
    if common.deadline < common.timestamp {
        return Err(TransactionError::MalformedInput(format!(
            "deadline {} precedes timestamp {}",
            common.deadline, common.timestamp
        )));
    }
    Ok(())
}

/// Checks that `address` is a plausible address on `network`: 40 base32
/// characters starting with the network's prefix letter.
///
/// The embedded checksum is not verified.
pub fn validate_recipient(address: &str, network: Network) -> Result<(), TransactionError> {
    if address.len() != ADDRESS_LENGTH {
        return Err(TransactionError::MalformedInput(format!(
            "recipient address must be {ADDRESS_LENGTH} characters, got {}",
            address.len()
        )));
    }
    if !address
        .bytes()
        .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b))
    {
        return Err(TransactionError::MalformedInput(format!(
            "recipient address {address} is not base32"
        )));
    }
    if !address.starts_with(network.address_prefix()) {
        return Err(TransactionError::MalformedInput(format!(
            "recipient address {address} does not belong to {network}"
        )));
    }
    Ok(())
}

/// Checks a transfer request against its header.
pub fn validate_transfer(
    common: &TransactionCommon,
    transfer: &Transfer,
) -> Result<(), TransactionError> {
    validate_common(common)?;
    validate_recipient(&transfer.recipient, common.network)
}
