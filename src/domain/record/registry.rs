//! Entity registry - the fixed set of tracked record kinds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// The four logical record kinds the tracker persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Seizure,
    Medication,
    MedicationReminder,
    DoseLog,
}

impl EntityKind {
    /// Every registered kind, in display order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Seizure,
        EntityKind::Medication,
        EntityKind::MedicationReminder,
        EntityKind::DoseLog,
    ];

    /// Resolves an untyped entity name, rejecting anything outside the registry.
    ///
    /// Names are matched exactly, the same way they appear in `/api/{entity}`.
    pub fn resolve(name: &str) -> Result<Self, DomainError> {
        match name {
            "Seizure" => Ok(Self::Seizure),
            "Medication" => Ok(Self::Medication),
            "MedicationReminder" => Ok(Self::MedicationReminder),
            "DoseLog" => Ok(Self::DoseLog),
            other => Err(DomainError::unknown_entity(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seizure => "Seizure",
            Self::Medication => "Medication",
            Self::MedicationReminder => "MedicationReminder",
            Self::DoseLog => "DoseLog",
        }
    }

    /// File holding this kind's collection in the file-backed store
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Seizure => "seizures.json",
            Self::Medication => "medications.json",
            Self::MedicationReminder => "reminders.json",
            Self::DoseLog => "dose_logs.json",
        }
    }

    /// Key holding this kind's collection in a namespaced key/value store
    pub fn storage_key(&self, namespace: &str) -> String {
        format!("{}:{}", namespace, self.as_str())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}
