//! In-memory record store modelled on a namespaced key/value slot map

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::record::{EntityKind, Record, RecordLifecycle};
use crate::domain::storage::{
    decode_collection, encode_collection, CorruptionPolicy, EntityLocks, RecordStore,
};
use crate::domain::DomainError;

pub const DEFAULT_NAMESPACE: &str = "neurotrack";

/// Thread-safe in-memory record store
///
/// Each collection is held as JSON array text under `"{namespace}:{Entity}"`,
/// the same layout a browser's local storage uses, so snapshots move freely
/// between this store and the file store. Data is lost when the process
/// terminates.
#[derive(Debug)]
pub struct InMemoryRecordStore {
    namespace: String,
    slots: RwLock<HashMap<String, String>>,
    corruption: CorruptionPolicy,
    locks: EntityLocks,
    lifecycle: RecordLifecycle,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Creates a new empty store under the default namespace
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            slots: RwLock::new(HashMap::new()),
            corruption: CorruptionPolicy::default(),
            locks: EntityLocks::new(),
            lifecycle: RecordLifecycle::default(),
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: RecordLifecycle) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    pub fn with_corruption_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption = policy;
        self
    }

    /// Seeds a raw slot value, e.g. text copied out of a browser profile
    pub fn with_raw(self, key: impl Into<String>, raw: impl Into<String>) -> Self {
        if let Ok(mut slots) = self.slots.write() {
            slots.insert(key.into(), raw.into());
        }
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Raw JSON text stored for `kind`, if any
    pub fn raw(&self, kind: EntityKind) -> Result<Option<String>, DomainError> {
        let slots = self.slots.read().map_err(|e| {
            DomainError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(slots.get(&kind.storage_key(&self.namespace)).cloned())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, DomainError> {
        match self.raw(kind)? {
            Some(raw) => decode_collection(kind, &raw, self.corruption),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, kind: EntityKind, records: &[Record]) -> Result<(), DomainError> {
        let raw = encode_collection(kind, records)?;
        let mut slots = self.slots.write().map_err(|e| {
            DomainError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        slots.insert(kind.storage_key(&self.namespace), raw);
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
    use crate::domain::storage::migrate;
    use crate::infrastructure::storage::{FileRecordStore, FileStoreConfig};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = InMemoryRecordStore::new();

        let created = store
            .create(EntityKind::Seizure, fields(json!({"seizure_type": "focal_aware"})))
            .await
            .unwrap();

        let list = store.list(EntityKind::Seizure).await.unwrap();
        assert_eq!(list, vec![created]);
    }

    #[tokio::test]
    async fn test_collections_live_under_namespaced_keys() {
        let store = InMemoryRecordStore::with_namespace("test-ns");

        store
            .create(EntityKind::Medication, fields(json!({"name": "Lamotrigine"})))
            .await
            .unwrap();

        let raw = store.raw(EntityKind::Medication).unwrap().unwrap();
        assert!(raw.contains("Lamotrigine"));
        assert!(store.raw(EntityKind::Seizure).unwrap().is_none());
        assert_eq!(store.namespace(), "test-ns");
    }

    #[tokio::test]
    async fn test_corrupt_slot_reads_as_empty() {
        let store = InMemoryRecordStore::new().with_raw("neurotrack:Seizure", "{not an array");

        assert!(store.list(EntityKind::Seizure).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_slot_fails_when_strict() {
        let store = InMemoryRecordStore::new()
            .with_corruption_policy(CorruptionPolicy::Fail)
            .with_raw("neurotrack:Seizure", "{not an array");

        let result = store.list(EntityKind::Seizure).await;
        assert!(matches!(result, Err(DomainError::MalformedStorage { .. })));
    }

    #[tokio::test]
    async fn test_seeded_slot_is_listed() {
        let store = InMemoryRecordStore::new()
            .with_raw("neurotrack:DoseLog", r#"[{"id": "d-1", "status": "taken"}]"#);

        let logs = store.list(EntityKind::DoseLog).await.unwrap();
        assert_eq!(logs[0].get_str("status"), Some("taken"));
    }

    #[tokio::test]
    async fn test_migrates_to_file_store() {
        let memory = InMemoryRecordStore::new();
        memory
            .create(EntityKind::Medication, fields(json!({"name": "Levetiracetam"})))
            .await
            .unwrap();
        memory
            .create(EntityKind::DoseLog, fields(json!({"status": "pending"})))
            .await
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let file = FileRecordStore::new(FileStoreConfig::new(dir.path()));

        let copied = migrate(&memory, &file).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            file.list(EntityKind::Medication).await.unwrap(),
            memory.list(EntityKind::Medication).await.unwrap()
        );
    }
}
