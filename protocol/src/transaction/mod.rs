//! # Transaction Module
//!
//! Everything between a decoded signing request and the canonical unsigned
//! bytes handed to the signing stage.
//!
//! ## Architecture
//!
//! ```text
//! types.rs      - Request values (Network, TransactionCommon, Transfer, Mosaic, ...)
//! builder.rs    - Fluent TransferBuilder for constructing transfer requests
//! validation.rs - Network and header sanity checks
//! amount.rs     - Mosaic quantities, levies, XEM totals and amount formatting
//! payload.rs    - Absent / plaintext / encrypted payload resolution
//! serialize.rs  - Byte-exact NEM wire encoding
//! signer.rs     - The end-to-end flow tying the above together
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Validate** - reject requests that cannot be valid on the target network.
//! 2. **Canonicalize** - sort and deduplicate mosaics.
//! 3. **Resolve payload** - pass plaintext through or seal it for the recipient.
//! 4. **Confirm** - walk the user through every value being signed.
//! 5. **Serialize** - emit the transaction bytes, or nothing at all.
//!
//! ## Design Decisions
//!
//! - Amounts are `u64` raw units everywhere; products are computed in 128
//!   bits and any result that does not fit its wire field is an error.
//! - The request is never mutated; the canonical form is a private copy.

pub mod amount;
pub mod builder;
pub mod payload;
pub mod serialize;
pub mod signer;
pub mod types;
pub mod validation;

pub use amount::{format_amount, levy_fee, mosaic_quantity, native_asset_amount, scaled_quantity};
pub use builder::TransferBuilder;
pub use payload::{resolve_payload, PayloadCipher, ResolvedPayload};
pub use serialize::{serialize_importance_transfer, serialize_transfer};
pub use signer::TransactionSigner;
pub use types::{
    ImportanceTransfer, ImportanceTransferMode, Mosaic, Network, TransactionCommon,
    TransactionRequest, Transfer,
};
