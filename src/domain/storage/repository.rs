//! Record store trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::record::{EntityKind, Record, RecordLifecycle};
use crate::domain::DomainError;

use super::locks::EntityLocks;

/// Durable, whole-collection store for every entity kind.
///
/// Backends supply `load` and `persist` for one collection; the CRUD
/// operations are built on top of them. Each mutation reads the entire
/// collection, transforms it and writes the entire collection back while
/// holding that entity's lock.
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// Reads a whole collection; a collection that does not exist yet is empty
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, DomainError>;

    /// Replaces a whole collection
    async fn persist(&self, kind: EntityKind, records: &[Record]) -> Result<(), DomainError>;

    /// Per-entity locks guarding read-modify-write cycles
    fn locks(&self) -> &EntityLocks;

    /// Id and timestamp policy applied on create and update
    fn lifecycle(&self) -> &RecordLifecycle;

    /// Lists every record of an entity in stored order
    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>, DomainError> {
        let _guard = self.locks().acquire(kind).await;
        self.load(kind).await
    }

    /// Appends a freshly stamped record built from `fields`
    async fn create(&self, kind: EntityKind, fields: Record) -> Result<Record, DomainError> {
        let _guard = self.locks().acquire(kind).await;

        let mut records = self.load(kind).await?;
        let record = self.lifecycle().stamp_new(fields);
        records.push(record.clone());
        self.persist(kind, &records).await?;

        debug!(entity = %kind, id = ?record.id(), "Record created");
        Ok(record)
    }

    /// Merges `fields` over the record with `id`, keeping its identity
    async fn update(
        &self,
        kind: EntityKind,
        id: &str,
        fields: Record,
    ) -> Result<Record, DomainError> {
        let _guard = self.locks().acquire(kind).await;

        let mut records = self.load(kind).await?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| DomainError::record_not_found(kind.as_str(), id))?;

        let updated = self.lifecycle().apply_update(slot, fields);
        *slot = updated.clone();
        self.persist(kind, &records).await?;

        debug!(entity = %kind, id = %id, "Record updated");
        Ok(updated)
    }

    /// Removes every record with `id`
    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), DomainError> {
        let _guard = self.locks().acquire(kind).await;

        let records = self.load(kind).await?;
        let before = records.len();
        let remaining: Vec<Record> = records.into_iter().filter(|r| r.id() != Some(id)).collect();

        if remaining.len() == before {
            return Err(DomainError::record_not_found(kind.as_str(), id));
        }

        self.persist(kind, &remaining).await?;

        debug!(entity = %kind, id = %id, "Record deleted");
        Ok(())
    }

    /// Overwrites a collection with a snapshot, bypassing the lifecycle policy
    async fn replace_all(&self, kind: EntityKind, records: Vec<Record>) -> Result<(), DomainError> {
        let _guard = self.locks().acquire(kind).await;
        self.persist(kind, &records).await?;

        debug!(entity = %kind, count = records.len(), "Collection replaced");
        Ok(())
    }

    /// Returns the number of records of an entity
    async fn count(&self, kind: EntityKind) -> Result<usize, DomainError> {
        Ok(self.list(kind).await?.len())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock store for testing, with optional injected failures
    #[derive(Debug, Default)]
    pub struct MockRecordStore {
        collections: Mutex<HashMap<EntityKind, Vec<Record>>>,
        error: Mutex<Option<String>>,
        locks: EntityLocks,
        lifecycle: RecordLifecycle,
    }

    impl MockRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_lifecycle(mut self, lifecycle: RecordLifecycle) -> Self {
            self.lifecycle = lifecycle;
            self
        }

        pub fn with_record(self, kind: EntityKind, record: Record) -> Self {
            self.collections
                .lock()
                .unwrap()
                .entry(kind)
                .or_default()
                .push(record);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::storage(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecordStore for MockRecordStore {
        async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, DomainError> {
            self.check_error()?;
            Ok(self
                .collections
                .lock()
                .unwrap()
                .get(&kind)
                .cloned()
                .unwrap_or_default())
        }

        async fn persist(&self, kind: EntityKind, records: &[Record]) -> Result<(), DomainError> {
            self.check_error()?;
            self.collections
                .lock()
                .unwrap()
                .insert(kind, records.to_vec());
            Ok(())
        }

        fn locks(&self) -> &EntityLocks {
            &self.locks
        }

        fn lifecycle(&self) -> &RecordLifecycle {
            &self.lifecycle
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::record::testing::{FixedClock, SequentialIds};
        use chrono::Duration;
        use serde_json::json;
        use std::sync::Arc;

        fn fields(value: serde_json::Value) -> Record {
            Record::from_value(value).unwrap()
        }

        fn store_with_clock() -> (MockRecordStore, Arc<FixedClock>) {
            let clock = Arc::new(FixedClock::at("2024-06-01T12:00:00Z"));
            let lifecycle =
                RecordLifecycle::new(clock.clone(), Arc::new(SequentialIds::default()));
            (MockRecordStore::new().with_lifecycle(lifecycle), clock)
        }

        #[tokio::test]
        async fn test_create_stamps_identity() {
            let (store, _) = store_with_clock();

            let a = store
                .create(EntityKind::Medication, fields(json!({"name": "A"})))
                .await
                .unwrap();
            let b = store
                .create(EntityKind::Medication, fields(json!({"name": "B"})))
                .await
                .unwrap();

            assert_eq!(a.id(), Some("rec-1"));
            assert_eq!(b.id(), Some("rec-2"));
            assert_eq!(a.created_date(), a.updated_date());
            assert_eq!(store.count(EntityKind::Medication).await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_create_has_no_uniqueness_beyond_id() {
            let (store, _) = store_with_clock();

            for _ in 0..2 {
                store
                    .create(EntityKind::Medication, fields(json!({"name": "Same"})))
                    .await
                    .unwrap();
            }

            assert_eq!(store.count(EntityKind::Medication).await.unwrap(), 2);
        }

        #[tokio::test]
        async fn test_update_merges_and_refreshes_updated_date() {
            let (store, clock) = store_with_clock();
            let created = store
                .create(
                    EntityKind::MedicationReminder,
                    fields(json!({"time": "08:00", "days_of_week": ["monday", "friday"]})),
                )
                .await
                .unwrap();
            let id = created.id().unwrap().to_string();

            clock.advance(Duration::seconds(30));
            let updated = store
                .update(
                    EntityKind::MedicationReminder,
                    &id,
                    fields(json!({"days_of_week": ["sunday"], "id": "other"})),
                )
                .await
                .unwrap();

            assert_eq!(updated.id(), Some(id.as_str()));
            assert_eq!(updated.get_str("time"), Some("08:00"));
            assert_eq!(updated.get("days_of_week"), Some(&json!(["sunday"])));
            assert_eq!(updated.updated_date(), Some("2024-06-01T12:00:30.000Z"));

            let stored = store.list(EntityKind::MedicationReminder).await.unwrap();
            assert_eq!(stored, vec![updated]);
        }

        #[tokio::test]
        async fn test_update_not_found() {
            let (store, _) = store_with_clock();

            let result = store
                .update(EntityKind::Seizure, "missing", Record::new())
                .await;

            assert!(matches!(
                result,
                Err(DomainError::RecordNotFound { ref id, .. }) if id == "missing"
            ));
        }

        #[tokio::test]
        async fn test_delete_removes_exactly_one_record() {
            let (store, _) = store_with_clock();
            let keep = store
                .create(EntityKind::DoseLog, fields(json!({"status": "taken"})))
                .await
                .unwrap();
            let gone = store
                .create(EntityKind::DoseLog, fields(json!({"status": "missed"})))
                .await
                .unwrap();

            store
                .delete(EntityKind::DoseLog, gone.id().unwrap())
                .await
                .unwrap();

            let remaining = store.list(EntityKind::DoseLog).await.unwrap();
            assert_eq!(remaining, vec![keep]);
        }

        #[tokio::test]
        async fn test_delete_not_found() {
            let (store, _) = store_with_clock();

            let result = store.delete(EntityKind::DoseLog, "missing").await;
            assert!(matches!(result, Err(DomainError::RecordNotFound { .. })));
        }

        #[tokio::test]
        async fn test_entities_are_independent() {
            let (store, _) = store_with_clock();

            store
                .create(EntityKind::Seizure, fields(json!({"seizure_type": "focal_aware"})))
                .await
                .unwrap();

            assert!(store.list(EntityKind::Medication).await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_with_error() {
            let store = MockRecordStore::new().with_error("Simulated storage error");

            let result = store.list(EntityKind::Seizure).await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }

        #[tokio::test]
        async fn test_with_record_seeds_collection() {
            let store = MockRecordStore::new()
                .with_record(EntityKind::Medication, fields(json!({"id": "m-1"})));

            let records = store.list(EntityKind::Medication).await.unwrap();
            assert_eq!(records[0].id(), Some("m-1"));
        }
    }
}
