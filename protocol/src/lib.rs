// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # NEM Transfer - Core Library
//!
//! Builds the canonical unsigned bytes of NEM (NIS1) transfer and
//! importance-transfer transactions on a signing device, after the user has
//! confirmed every value that goes into them.
//!
//! The bytes must match NEM consensus serialization exactly. A different
//! mosaic order, a wrongly scaled quantity or a silently wrapped integer
//! yields a transaction with a different hash, and the user would have
//! approved something other than what gets signed.
//!
//! ## Architecture
//!
//! - **config** - Consensus constants and local signer policy.
//! - **error** - The error taxonomy shared by every step.
//! - **mosaic** - Definitions, the lookup port and canonical ordering.
//! - **transaction** - Request types, amounts, payloads, the codec and the
//!   end-to-end signing flow.
//! - **confirm** - Prompt sequences and the UI port.
//! - **crypto** - Payload sealing for encrypted messages.
//!
//! ## Example
//!
//! ```
//! use nem_transfer::confirm::Prompt;
//! use nem_transfer::mosaic::MosaicRegistry;
//! use nem_transfer::transaction::{
//!     Network, TransactionCommon, TransactionSigner, TransferBuilder,
//! };
//!
//! let registry = MosaicRegistry::builtin();
//! let signer = TransactionSigner::new([0x42; 32], &registry);
//!
//! let common = TransactionCommon {
//!     network: Network::Testnet,
//!     timestamp: 74_649_215,
//!     fee: 2_000_000,
//!     deadline: 74_735_615,
//! };
//! let transfer = TransferBuilder::new("TALICE2A73DLYTP4365GNFCURAUP3XVBFO7YNYOW")
//!     .amount(2_000_000)
//!     .message("test")
//!     .build();
//!
//! let mut approve = |_: &Prompt| true;
//! let bytes = signer.transfer(&mut approve, &common, &transfer).unwrap();
//! assert_eq!(&bytes[..4], &[0x01, 0x01, 0x00, 0x00]);
//! ```

pub mod config;
pub mod confirm;
pub mod crypto;
pub mod error;
pub mod mosaic;
pub mod transaction;

pub use error::{ConfirmStep, TransactionError};

/// Crate version, as reported by `nem-signer version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
