//! Untyped stored record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

pub const ID_FIELD: &str = "id";
pub const CREATED_DATE_FIELD: &str = "created_date";
pub const UPDATED_DATE_FIELD: &str = "updated_date";

/// A single stored record: a flat mapping of field names to JSON values.
///
/// Fields the store does not know about are kept verbatim, and absent fields
/// stay absent through a save/load cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a record from a request body, which must be a JSON object
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(DomainError::validation(format!(
                "Record fields must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str(ID_FIELD)
    }

    pub fn created_date(&self) -> Option<&str> {
        self.get_str(CREATED_DATE_FIELD)
    }

    pub fn updated_date(&self) -> Option<&str> {
        self.get_str(UPDATED_DATE_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Shallow merge: every field of `other` replaces the field of the same name
    pub fn merge(&mut self, other: Record) {
        for (name, value) in other.0 {
            self.0.insert(name, value);
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_objects() {
        let record = Record::from_value(json!({"name": "Levetiracetam"})).unwrap();
        assert_eq!(record.get_str("name"), Some("Levetiracetam"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = Record::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("an array"));

        assert!(Record::from_value(json!("text")).is_err());
        assert!(Record::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_merge_replaces_arrays_wholesale() {
        let mut record = Record::new()
            .with_field("days_of_week", json!(["monday", "tuesday", "friday"]))
            .with_field("time", "08:00");

        record.merge(Record::new().with_field("days_of_week", json!(["sunday"])));

        assert_eq!(record.get("days_of_week"), Some(&json!(["sunday"])));
        assert_eq!(record.get_str("time"), Some("08:00"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let record = Record::new().with_field("id", "r-1").with_field("nocturnal", true);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id": "r-1", "nocturnal": true}));
    }

    #[test]
    fn test_identity_accessors() {
        let record = Record::new()
            .with_field(ID_FIELD, "abc")
            .with_field(CREATED_DATE_FIELD, "2024-01-01T00:00:00.000Z")
            .with_field(UPDATED_DATE_FIELD, "2024-01-02T00:00:00.000Z");

        assert_eq!(record.id(), Some("abc"));
        assert_eq!(record.created_date(), Some("2024-01-01T00:00:00.000Z"));
        assert_eq!(record.updated_date(), Some("2024-01-02T00:00:00.000Z"));
    }
}
