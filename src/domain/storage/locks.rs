//! Per-entity mutual exclusion for read-modify-write cycles

use tokio::sync::{Mutex, MutexGuard};

use crate::domain::record::EntityKind;

/// One async mutex per entity kind.
///
/// Holding the guard for a whole load-transform-persist cycle serializes
/// writers to the same collection while leaving other collections free.
#[derive(Debug, Default)]
pub struct EntityLocks {
    seizure: Mutex<()>,
    medication: Mutex<()>,
    reminder: Mutex<()>,
    dose_log: Mutex<()>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, kind: EntityKind) -> MutexGuard<'_, ()> {
        self.slot(kind).lock().await
    }

    fn slot(&self, kind: EntityKind) -> &Mutex<()> {
        match kind {
            EntityKind::Seizure => &self.seizure,
            EntityKind::Medication => &self.medication,
            EntityKind::MedicationReminder => &self.reminder,
            EntityKind::DoseLog => &self.dose_log,
        }
    }
}
