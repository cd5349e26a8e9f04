//! The ordered confirmation sequences for each transaction kind.
//!
//! Transfer: payload (if any), each non-XEM mosaic (with its levy), the
//! recipient and XEM total, then the fee. Importance transfer: the mode,
//! then the fee. The first declined prompt ends the sequence.

use tracing::{debug, warn};

use crate::config::{MAX_DIVISIBILITY, NATIVE_TICKER};
use crate::error::TransactionError;
use crate::mosaic::{MosaicDefinition, MosaicLookup};
use crate::transaction::amount::{format_amount, levy_fee, mosaic_quantity, native_asset_amount};
use crate::transaction::payload::ResolvedPayload;
use crate::transaction::types::{ImportanceTransfer, Mosaic, TransactionCommon, Transfer};

use super::prompt::{ConfirmationUi, Prompt};

/// Shows `prompt` and turns a decline into [`TransactionError::UserRejected`].
pub fn require(ui: &mut dyn ConfirmationUi, prompt: Prompt) -> Result<(), TransactionError> {
    let step = prompt.step();
    if ui.confirm(&prompt) {
        debug!(%step, "confirmed");
        Ok(())
    } else {
        warn!(%step, "user rejected");
        Err(TransactionError::UserRejected(step))
    }
}

/// Runs the transfer confirmation sequence.
///
/// `transfer.mosaics` must already be canonical; prompts follow its order.
pub fn confirm_transfer(
    ui: &mut dyn ConfirmationUi,
    lookup: &dyn MosaicLookup,
    common: &TransactionCommon,
    transfer: &Transfer,
    payload: &ResolvedPayload,
) -> Result<(), TransactionError> {
    if !payload.is_empty() {
        require(
            ui,
            Prompt::Payload {
                text: payload.text.clone(),
                encrypted: payload.encrypted,
            },
        )?;
    }

    for mosaic in &transfer.mosaics {
        confirm_mosaic(ui, lookup, common, transfer, mosaic)?;
    }

    let total = native_asset_amount(transfer)?;
    require(
        ui,
        Prompt::Transfer {
            recipient: transfer.recipient.clone(),
            amount: format!("Send {}", xem(total)),
        },
    )?;

    confirm_fee(ui, common)
}

/// Confirms one mosaic. XEM entries are skipped: they are part of the total.
pub fn confirm_mosaic(
    ui: &mut dyn ConfirmationUi,
    lookup: &dyn MosaicLookup,
    common: &TransactionCommon,
    transfer: &Transfer,
    mosaic: &Mosaic,
) -> Result<(), TransactionError> {
    if mosaic.is_native() {
        return Ok(());
    }

    let quantity = mosaic_quantity(mosaic.quantity, transfer.amount)?;

    let Some(definition) = lookup.lookup(&mosaic.namespace, &mosaic.mosaic, common.network) else {
        warn!(mosaic = %mosaic.identifier(), network = %common.network, "unknown mosaic");
        require(ui, Prompt::UnknownMosaic)?;
        return require(
            ui,
            Prompt::UnknownMosaicTransfer {
                raw_units: quantity,
                identifier: mosaic.identifier(),
            },
        );
    };

    require(
        ui,
        Prompt::Mosaic {
            amount: with_ticker(quantity, definition),
            name: definition.name.clone(),
        },
    )?;

    if let Some(levy) = &definition.levy {
        let fee = levy_fee(levy.kind, quantity, levy.fee)?;
        let fee = match lookup.lookup(&levy.namespace, &levy.mosaic, common.network) {
            Some(levy_definition) => with_ticker(fee, levy_definition),
            None => format!("{fee} raw units of {}.{}", levy.namespace, levy.mosaic),
        };
        require(ui, Prompt::MosaicLevy { fee })?;
    }

    Ok(())
}

/// Runs the importance-transfer confirmation sequence.
pub fn confirm_importance_transfer(
    ui: &mut dyn ConfirmationUi,
    common: &TransactionCommon,
    imp: &ImportanceTransfer,
) -> Result<(), TransactionError> {
    require(ui, Prompt::ImportanceMode { mode: imp.mode })?;
    confirm_fee(ui, common)
}

fn confirm_fee(ui: &mut dyn ConfirmationUi, common: &TransactionCommon) -> Result<(), TransactionError> {
    require(ui, Prompt::Fee { fee: xem(common.fee) })
}

fn xem(value: u64) -> String {
    format!("{} {}", format_amount(value, MAX_DIVISIBILITY), NATIVE_TICKER)
}

fn with_ticker(value: u64, definition: &MosaicDefinition) -> String {
    format!(
        "{} {}",
        format_amount(value, definition.divisibility),
        definition.ticker
    )
}
