//! Prompts shown to the user and the UI port that shows them.

use std::fmt;

use crate::error::ConfirmStep;
use crate::transaction::types::ImportanceTransferMode;

/// One confirmation screen, with every value already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// The transfer message. `text` is `None` when the message is encrypted:
    /// the device only vouches for the fact that it was sealed.
    Payload { text: Option<String>, encrypted: bool },
    /// Transfer of a mosaic with a known definition.
    Mosaic {
        /// Quantity with divisibility and ticker, e.g. `"1.5 DIM"`.
        amount: String,
        /// Display name from the definition.
        name: String,
    },
    /// Levy charged on the preceding mosaic, e.g. `"0.0015 DIM"`.
    MosaicLevy { fee: String },
    /// Warning that divisibility and levy cannot be shown.
    UnknownMosaic,
    /// Transfer of a mosaic without a definition, in raw units.
    UnknownMosaicTransfer { raw_units: u64, identifier: String },
    /// Recipient and XEM total, e.g. `"Send 1.5 XEM"`.
    Transfer { recipient: String, amount: String },
    /// Remote harvesting activation or deactivation.
    ImportanceMode { mode: ImportanceTransferMode },
    /// Network fee in XEM, e.g. `"0.15 XEM"`.
    Fee { fee: String },
}

impl Prompt {
    /// The confirmation step this prompt belongs to.
    pub fn step(&self) -> ConfirmStep {
        match self {
            Self::Payload { .. } => ConfirmStep::Payload,
            Self::Mosaic { .. } => ConfirmStep::Mosaic,
            Self::MosaicLevy { .. } => ConfirmStep::MosaicLevy,
            Self::UnknownMosaic => ConfirmStep::UnknownMosaic,
            Self::UnknownMosaicTransfer { .. } => ConfirmStep::UnknownMosaicTransfer,
            Self::Transfer { .. } => ConfirmStep::Transfer,
            Self::ImportanceMode { .. } => ConfirmStep::ImportanceMode,
            Self::Fee { .. } => ConfirmStep::Fee,
        }
    }

    /// Screen title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Payload { .. } => "Confirm payload",
            Self::Mosaic { .. }
            | Self::MosaicLevy { .. }
            | Self::UnknownMosaic
            | Self::UnknownMosaicTransfer { .. } => "Confirm mosaic",
            Self::Transfer { .. } => "Confirm transfer",
            Self::ImportanceMode { .. } => "Confirm action",
            Self::Fee { .. } => "Final confirm",
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payload {
                text: Some(text),
                encrypted: false,
            } => write!(f, "Unencrypted:\n{text}"),
            Self::Payload { .. } => write!(f, "Encrypted message"),
            Self::Mosaic { amount, name } => write!(f, "Confirm transfer of\n{amount}\nof\n{name}"),
            Self::MosaicLevy { fee } => write!(f, "Confirm mosaic\nlevy fee of\n{fee}"),
            Self::UnknownMosaic => write!(
                f,
                "Unknown mosaic!\nDivisibility and levy cannot be shown for unknown mosaics"
            ),
            Self::UnknownMosaicTransfer {
                raw_units,
                identifier,
            } => write!(f, "Confirm transfer of\n{raw_units} raw units\nof\n{identifier}"),
            Self::Transfer { recipient, amount } => write!(f, "{amount}\nto\n{recipient}"),
            Self::ImportanceMode { mode } => write!(f, "{mode} remote harvesting?"),
            Self::Fee { fee } => write!(f, "Sign this transaction\nand pay {fee}\nfor network fee?"),
        }
    }
}

/// The device display and buttons.
///
/// Each call shows one prompt and blocks until the user decides.
pub trait ConfirmationUi {
    /// Returns `true` if the user approved `prompt`.
    fn confirm(&mut self, prompt: &Prompt) -> bool;
}

impl<F> ConfirmationUi for F
where
    F: FnMut(&Prompt) -> bool,
{
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        self(prompt)
    }
}
