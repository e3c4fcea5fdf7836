use serde::{Deserialize, Serialize};

use super::typed::{Model, RecordMeta};
use crate::domain::record::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A recurring dose reminder.
///
/// `medication_id` is a weak reference and `medication_name` a copy taken
/// when the reminder was last saved; neither is kept in sync by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicationReminder {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub medication_id: String,
    pub medication_name: String,
    /// `HH:MM`
    pub time: String,
    pub days_of_week: Vec<Weekday>,
    pub is_active: bool,
    pub notes: String,
}

impl Model for MedicationReminder {
    const KIND: EntityKind = EntityKind::MedicationReminder;
}
