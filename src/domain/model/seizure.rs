use serde::{Deserialize, Serialize};

use super::typed::{empty_as_none, Model, RecordMeta};
use crate::domain::record::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeizureSeverity {
    Mild,
    Moderate,
    Severe,
}

/// A logged seizure event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seizure {
    #[serde(flatten)]
    pub meta: RecordMeta,
    /// Classification key, e.g. `focal_aware` or `generalized_tonic_clonic`
    pub seizure_type: String,
    pub date_time: String,
    pub duration_seconds: Option<i64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub severity: Option<SeizureSeverity>,
    pub nocturnal: bool,
    pub triggers: String,
    pub notes: String,
    pub post_ictal_symptoms: String,
}

impl Model for Seizure {
    const KIND: EntityKind = EntityKind::Seizure;
}
