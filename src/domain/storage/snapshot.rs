//! Whole-store snapshots for backup and migration between backends

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::record::{EntityKind, Record};
use crate::domain::DomainError;

use super::repository::RecordStore;

/// Every collection of a store, keyed by entity name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    collections: BTreeMap<EntityKind, Vec<Record>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, kind: EntityKind, records: Vec<Record>) -> Self {
        self.collections.insert(kind, records);
        self
    }

    pub fn collection(&self, kind: EntityKind) -> Option<&[Record]> {
        self.collections.get(&kind).map(Vec::as_slice)
    }

    pub fn total_records(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn into_collections(self) -> impl Iterator<Item = (EntityKind, Vec<Record>)> {
        self.collections.into_iter()
    }
}

/// Captures every collection of `store`
pub async fn export_snapshot(store: &dyn RecordStore) -> Result<Snapshot, DomainError> {
    let mut snapshot = Snapshot::new();

    for kind in EntityKind::ALL {
        let records = store.list(kind).await?;
        snapshot = snapshot.with_collection(kind, records);
    }

    Ok(snapshot)
}

/// Replaces each collection present in `snapshot`; collections it omits are untouched
pub async fn import_snapshot(
    store: &dyn RecordStore,
    snapshot: Snapshot,
) -> Result<usize, DomainError> {
    let mut imported = 0;

    for (kind, records) in snapshot.into_collections() {
        imported += records.len();
        store.replace_all(kind, records).await?;
    }

    Ok(imported)
}

/// Copies all four collections from one backend to another
pub async fn migrate(from: &dyn RecordStore, to: &dyn RecordStore) -> Result<usize, DomainError> {
    let snapshot = export_snapshot(from).await?;
    let total = import_snapshot(to, snapshot).await?;

    info!(records = total, "Migrated collections between stores");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockRecordStore;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_snapshot_serializes_by_entity_name() {
        let snapshot = Snapshot::new()
            .with_collection(EntityKind::Medication, vec![record(json!({"id": "m-1"}))])
            .with_collection(EntityKind::DoseLog, vec![]);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            json!({"Medication": [{"id": "m-1"}], "DoseLog": []})
        );

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_rejects_unknown_entity() {
        let result = serde_json::from_value::<Snapshot>(json!({"Patient": []}));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_export_includes_every_entity() {
        let store = MockRecordStore::new()
            .with_record(EntityKind::Seizure, record(json!({"id": "s-1"})));

        let snapshot = export_snapshot(&store).await.unwrap();

        for kind in EntityKind::ALL {
            assert!(snapshot.collection(kind).is_some());
        }
        assert_eq!(snapshot.total_records(), 1);
    }

    #[tokio::test]
    async fn test_migrate_copies_records_verbatim() {
        let source = MockRecordStore::new()
            .with_record(
                EntityKind::Medication,
                record(json!({
                    "id": "m-1",
                    "name": "Levetiracetam",
                    "created_date": "2024-01-01T00:00:00.000Z",
                    "updated_date": "2024-01-01T00:00:00.000Z"
                })),
            )
            .with_record(
                EntityKind::MedicationReminder,
                record(json!({"id": "r-1", "medication_id": "m-1"})),
            );
        let target = MockRecordStore::new()
            .with_record(EntityKind::Medication, record(json!({"id": "stale"})));

        let copied = migrate(&source, &target).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            target.list(EntityKind::Medication).await.unwrap(),
            source.list(EntityKind::Medication).await.unwrap()
        );
        assert_eq!(target.count(EntityKind::MedicationReminder).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_import_leaves_omitted_collections() {
        let store = MockRecordStore::new()
            .with_record(EntityKind::Seizure, record(json!({"id": "s-1"})));
        let snapshot = Snapshot::new()
            .with_collection(EntityKind::Medication, vec![record(json!({"id": "m-1"}))]);

        let imported = import_snapshot(&store, snapshot).await.unwrap();

        assert_eq!(imported, 1);
        assert_eq!(store.count(EntityKind::Seizure).await.unwrap(), 1);
        assert_eq!(store.count(EntityKind::Medication).await.unwrap(), 1);
    }
}
