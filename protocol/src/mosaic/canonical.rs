//! Canonical ordering of a transfer's mosaic attachments.
//!
//! NEM serializes mosaics in the order the transaction lists them, so two
//! hosts describing the same transfer must agree on an order or they sign
//! different bytes. The canonical form is sorted by `(namespace, mosaic)`
//! with at most one entry per pair.

use std::collections::BTreeMap;

use crate::config::DuplicatePolicy;
use crate::error::TransactionError;
use crate::transaction::types::Mosaic;

/// Validates, deduplicates and sorts `mosaics`.
///
/// The result depends only on the input and `policy`, never on the network
/// or on the definition table, and canonicalizing a canonical list returns
/// it unchanged.
///
/// # Errors
///
/// - [`TransactionError::MalformedInput`] for an invalid identifier, or a
///   duplicated pair under [`DuplicatePolicy::Reject`].
/// - [`TransactionError::EncodingOverflow`] if merged quantities exceed
///   `u64`.
pub fn canonicalize_mosaics(
    mosaics: &[Mosaic],
    policy: DuplicatePolicy,
) -> Result<Vec<Mosaic>, TransactionError> {
    let mut merged: BTreeMap<(&str, &str), u64> = BTreeMap::new();

    for mosaic in mosaics {
        validate_identifier(mosaic)?;

        let key = (mosaic.namespace.as_str(), mosaic.mosaic.as_str());
        match merged.get_mut(&key) {
            None => {
                merged.insert(key, mosaic.quantity);
            }
            Some(_) if policy == DuplicatePolicy::Reject => {
                return Err(TransactionError::MalformedInput(format!(
                    "mosaic {} listed more than once",
                    mosaic.identifier()
                )));
            }
            Some(total) => {
                *total = total
                    .checked_add(mosaic.quantity)
                    .ok_or(TransactionError::EncodingOverflow {
                        field: "mosaic quantity",
                    })?;
            }
        }
    }

    Ok(merged
        .into_iter()
        .map(|((namespace, mosaic), quantity)| Mosaic::new(namespace, mosaic, quantity))
        .collect())
}

/// Returns `true` if `mosaics` is already in canonical form.
pub fn is_canonical(mosaics: &[Mosaic]) -> bool {
    mosaics
        .windows(2)
        .all(|w| (&w[0].namespace, &w[0].mosaic) < (&w[1].namespace, &w[1].mosaic))
}

fn validate_identifier(mosaic: &Mosaic) -> Result<(), TransactionError> {
    if !mosaic.namespace.split('.').all(is_namespace_part) {
        return Err(TransactionError::MalformedInput(format!(
            "invalid mosaic namespace {:?}",
            mosaic.namespace
        )));
    }
    if !is_mosaic_name(&mosaic.mosaic) {
        return Err(TransactionError::MalformedInput(format!(
            "invalid mosaic name {:?}",
            mosaic.mosaic
        )));
    }
    Ok(())
}

/// `[a-z0-9][a-z0-9_-]*`
fn is_namespace_part(part: &str) -> bool {
    match part.as_bytes() {
        [first, rest @ ..] => is_name_start(*first) && rest.iter().copied().all(is_name_byte),
        [] => false,
    }
}

/// `[a-z0-9][a-z0-9'_-]*( [a-z0-9'_-]+)*`: words separated by single spaces.
fn is_mosaic_name(name: &str) -> bool {
    let starts_well = name.bytes().next().is_some_and(is_name_start);
    starts_well
        && name
            .split(' ')
            .all(|word| !word.is_empty() && word.bytes().all(|b| is_name_byte(b) || b == b'\''))
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit()
}

fn is_name_byte(b: u8) -> bool {
    is_name_start(b) || b == b'_' || b == b'-'
}
