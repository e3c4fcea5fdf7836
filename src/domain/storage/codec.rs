//! JSON array serialization shared by every backend

use tracing::warn;

use crate::domain::record::{EntityKind, Record};
use crate::domain::DomainError;

/// What to do when a stored collection cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptionPolicy {
    /// Log a warning and treat the collection as empty
    #[default]
    TreatAsEmpty,
    /// Fail the operation with `MalformedStorage`
    Fail,
}

impl CorruptionPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Fail
        } else {
            Self::TreatAsEmpty
        }
    }
}

/// Parses a stored JSON array of records.
///
/// Under `TreatAsEmpty` a parse failure yields an empty collection. The next
/// write to that entity then replaces the unreadable data.
pub fn decode_collection(
    kind: EntityKind,
    raw: &str,
    policy: CorruptionPolicy,
) -> Result<Vec<Record>, DomainError> {
    match serde_json::from_str::<Vec<Record>>(raw) {
        Ok(records) => Ok(records),
        Err(e) => match policy {
            CorruptionPolicy::TreatAsEmpty => {
                warn!(
                    entity = %kind,
                    error = %e,
                    "Stored collection is unreadable, treating it as empty"
                );
                Ok(Vec::new())
            }
            CorruptionPolicy::Fail => Err(DomainError::malformed_storage(kind.as_str(), e.to_string())),
        },
    }
}

/// Serializes a collection as a pretty-printed JSON array
pub fn encode_collection(kind: EntityKind, records: &[Record]) -> Result<String, DomainError> {
    serde_json::to_string_pretty(records).map_err(|e| {
        DomainError::storage(format!("Failed to serialize {} collection: {}", kind, e))
    })
}
