use serde::{Deserialize, Serialize};

use super::typed::{Model, RecordMeta};
use crate::domain::record::EntityKind;

/// A prescribed medication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Medication {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub purpose: String,
    pub prescribing_doctor: String,
    pub start_date: String,
    pub notes: String,
    pub is_active: bool,
}

impl Model for Medication {
    const KIND: EntityKind = EntityKind::Medication;
}
