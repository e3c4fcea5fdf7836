//! File-backed record store: one JSON array file per entity

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::record::{EntityKind, Record, RecordLifecycle};
use crate::domain::storage::{
    decode_collection, encode_collection, CorruptionPolicy, EntityLocks, RecordStore,
};
use crate::domain::DomainError;

/// File storage configuration
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    /// Directory holding the per-entity JSON files
    pub data_dir: PathBuf,
    /// Handling of unreadable files
    pub corruption: CorruptionPolicy,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            corruption: CorruptionPolicy::default(),
        }
    }
}

impl FileStoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_corruption_policy(mut self, policy: CorruptionPolicy) -> Self {
        self.corruption = policy;
        self
    }
}

/// Record store persisting each entity as a pretty-printed JSON array file.
///
/// A missing file reads as an empty collection. The data directory is created
/// on the first write.
#[derive(Debug)]
pub struct FileRecordStore {
    config: FileStoreConfig,
    locks: EntityLocks,
    lifecycle: RecordLifecycle,
}

impl FileRecordStore {
    pub fn new(config: FileStoreConfig) -> Self {
        Self::with_lifecycle(config, RecordLifecycle::default())
    }

    pub fn with_lifecycle(config: FileStoreConfig, lifecycle: RecordLifecycle) -> Self {
        Self {
            config,
            locks: EntityLocks::new(),
            lifecycle,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of the file holding `kind`'s collection
    pub fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.config.data_dir.join(kind.file_name())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn load(&self, kind: EntityKind) -> Result<Vec<Record>, DomainError> {
        let path = self.collection_path(kind);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        decode_collection(kind, &raw, self.config.corruption)
    }

    async fn persist(&self, kind: EntityKind, records: &[Record]) -> Result<(), DomainError> {
        let path = self.collection_path(kind);
        let raw = encode_collection(kind, records)?;

        fs::create_dir_all(&self.config.data_dir).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to create data directory {}: {}",
                self.config.data_dir.display(),
                e
            ))
        })?;

        fs::write(&path, raw).await.map_err(|e| {
            DomainError::storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn locks(&self) -> &EntityLocks {
        &self.locks
    }

    fn lifecycle(&self) -> &RecordLifecycle {
        &self.lifecycle
    }
}
