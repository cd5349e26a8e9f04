//! # Mosaics
//!
//! Mosaics are named sub-assets that ride along with a transfer. This module
//! owns the two things the rest of the flow needs to know about them:
//!
//! ```text
//! definition.rs - display/levy metadata and the read-only lookup port
//! canonical.rs  - validation, deduplication and canonical ordering
//! ```

pub mod canonical;
pub mod definition;

pub use canonical::{canonicalize_mosaics, is_canonical};
pub use definition::{Levy, LevyKind, MosaicDefinition, MosaicLookup, MosaicRegistry};
