//! Quantity, levy and total calculations.
//!
//! All arithmetic is integer arithmetic on raw units with floor division.
//! Products are computed in 128 bits and narrowed back to `u64`; a result
//! that does not fit is an [`TransactionError::EncodingOverflow`], never a
//! wrapped value.

use crate::config::{LEVY_PERCENTILE_DIVISOR, MOSAIC_AMOUNT_DIVISOR};
use crate::error::TransactionError;
use crate::mosaic::LevyKind;

use super::types::Transfer;

/// Computes `floor(quantity * amount / divisor)`.
///
/// # Errors
///
/// `MalformedInput` for a zero divisor, `EncodingOverflow` if the result
/// exceeds `u64::MAX`.
pub fn scaled_quantity(quantity: u64, amount: u64, divisor: u64) -> Result<u64, TransactionError> {
    if divisor == 0 {
        return Err(TransactionError::MalformedInput(
            "quantity divisor must be positive".into(),
        ));
    }
    let scaled = u128::from(quantity) * u128::from(amount) / u128::from(divisor);
    u64::try_from(scaled).map_err(|_| TransactionError::EncodingOverflow {
        field: "mosaic quantity",
    })
}

/// Quantity of a mosaic actually moved by a transfer whose `amount` is the
/// mosaic multiplier.
pub fn mosaic_quantity(quantity: u64, transfer_amount: u64) -> Result<u64, TransactionError> {
    scaled_quantity(quantity, transfer_amount, MOSAIC_AMOUNT_DIVISOR)
}

/// Levy charged on transferring `quantity` units of a mosaic.
///
/// Absolute levies charge `fee` as is; percentile levies charge
/// `floor(quantity * fee / LEVY_PERCENTILE_DIVISOR)`.
pub fn levy_fee(kind: LevyKind, quantity: u64, fee: u64) -> Result<u64, TransactionError> {
    match kind {
        LevyKind::Absolute => Ok(fee),
        LevyKind::Percentile => scaled_quantity(quantity, fee, LEVY_PERCENTILE_DIVISOR).map_err(
            |_| TransactionError::EncodingOverflow { field: "levy fee" },
        ),
    }
}

/// The amount of XEM a transfer moves.
///
/// Without mosaics the transfer amount is the XEM amount. With mosaics the
/// XEM amount comes from the `nem.xem` entry, and a mosaic-only transfer
/// that omits it moves no XEM at all.
pub fn native_asset_amount(transfer: &Transfer) -> Result<u64, TransactionError> {
    if transfer.mosaics.is_empty() {
        return Ok(transfer.amount);
    }
    match transfer.mosaics.iter().find(|m| m.is_native()) {
        Some(xem) => mosaic_quantity(xem.quantity, transfer.amount),
        None => Ok(0),
    }
}

/// Renders a raw quantity with `decimals` decimal places.
///
/// Trailing fractional zeros are dropped, and so is the decimal point when
/// nothing follows it: `format_amount(1_500_000, 6) == "1.5"`.
pub fn format_amount(value: u64, decimals: u32) -> String {
    let digits = value.to_string();
    if decimals == 0 || value == 0 {
        return digits;
    }

    let scale = decimals as usize;
    let (whole, fraction) = if digits.len() > scale {
        let (whole, fraction) = digits.split_at(digits.len() - scale);
        (whole.to_string(), fraction.to_string())
    } else {
        ("0".to_string(), "0".repeat(scale - digits.len()) + &digits)
    };

    match fraction.trim_end_matches('0') {
        "" => whole,
        fraction => format!("{whole}.{fraction}"),
    }
}
