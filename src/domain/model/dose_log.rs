use serde::{Deserialize, Serialize};

use super::typed::{Model, RecordMeta};
use crate::domain::record::EntityKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    #[default]
    Pending,
    Taken,
    Missed,
    Skipped,
}

/// Outcome of one scheduled dose
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoseLog {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub medication_id: String,
    pub medication_name: String,
    pub scheduled_date: String,
    pub scheduled_time: String,
    pub taken_at: Option<String>,
    pub status: DoseStatus,
    pub notes: String,
}

impl Model for DoseLog {
    const KIND: EntityKind = EntityKind::DoseLog;
}
