//! Conversion between untyped records and typed models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::record::{EntityKind, Record};
use crate::domain::DomainError;

/// A typed entity bound to its registry kind
pub trait Model: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;
}

/// Identity fields stamped by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

pub fn to_record<T: Model>(model: &T) -> Result<Record, DomainError> {
    let value = serde_json::to_value(model).map_err(|e| {
        DomainError::validation(format!("Failed to serialize {}: {}", T::KIND, e))
    })?;

    Record::from_value(value)
}

pub fn from_record<T: Model>(record: Record) -> Result<T, DomainError> {
    serde_json::from_value(record.into_value()).map_err(|e| {
        DomainError::validation(format!("Record is not a valid {}: {}", T::KIND, e))
    })
}

/// Treats `""` (what the forms send for an unset select) as absent
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Medication;
    use serde_json::json;

    #[test]
    fn test_round_trip_through_record() {
        let medication = Medication {
            name: "Lamotrigine".to_string(),
            dosage: "100mg".to_string(),
            is_active: true,
            ..Default::default()
        };

        let record = to_record(&medication).unwrap();
        assert!(record.id().is_none());
        assert_eq!(record.get_str("name"), Some("Lamotrigine"));

        let back: Medication = from_record(record).unwrap();
        assert_eq!(back, medication);
    }

    #[test]
    fn test_from_record_reports_kind() {
        let record = Record::from_value(json!({"name": 42})).unwrap();
        let err = from_record::<Medication>(record).unwrap_err();
        assert!(err.to_string().contains("Medication"));
    }
}
