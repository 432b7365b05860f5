//! Flat JSON encoding of the flag map: `{"item-id": true, ...}`.

use std::collections::BTreeMap;

use checklist_core::model::{FlagMap, ItemId};

use crate::repository::StorageError;

/// Serialize the full flag map as one JSON object.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_flags(flags: &FlagMap) -> Result<String, StorageError> {
    let flat: BTreeMap<&str, bool> = flags
        .iter()
        .map(|(id, done)| (id.as_str(), *done))
        .collect();
    serde_json::to_string(&flat).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Parse a stored blob. Anything that is not a flat object of booleans is
/// treated as absent. Blank or padded keys are skipped.
#[must_use]
pub fn decode_flags(blob: &str) -> Option<FlagMap> {
    let flat: BTreeMap<String, bool> = serde_json::from_str(blob).ok()?;
    Some(
        flat.into_iter()
            .filter_map(|(id, done)| ItemId::new(id).ok().map(|id| (id, done)))
            .collect(),
    )
}
