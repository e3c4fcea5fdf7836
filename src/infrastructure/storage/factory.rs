//! Storage factory for runtime backend selection

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::record::RecordLifecycle;
use crate::domain::storage::{CorruptionPolicy, RecordStore};

use super::file::{FileRecordStore, FileStoreConfig};
use super::in_memory::{InMemoryRecordStore, DEFAULT_NAMESPACE};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// JSON files on disk
    File,
    /// Ephemeral namespaced key/value slots
    InMemory,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// File storage configuration
    File(FileStoreConfig),
    /// In-memory storage configuration
    InMemory {
        namespace: String,
        corruption: CorruptionPolicy,
    },
}

impl StorageConfig {
    /// Creates a file storage configuration rooted at `data_dir`
    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self::File(FileStoreConfig::new(data_dir))
    }

    /// Creates an in-memory storage configuration under the default namespace
    pub fn in_memory() -> Self {
        Self::InMemory {
            namespace: DEFAULT_NAMESPACE.to_string(),
            corruption: CorruptionPolicy::default(),
        }
    }

    pub fn with_corruption_policy(self, policy: CorruptionPolicy) -> Self {
        match self {
            Self::File(config) => Self::File(config.with_corruption_policy(policy)),
            Self::InMemory { namespace, .. } => Self::InMemory {
                namespace,
                corruption: policy,
            },
        }
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::File(_) => StorageType::File,
            Self::InMemory { .. } => StorageType::InMemory,
        }
    }
}

/// Factory for creating record stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a store based on the configuration
    pub fn create(config: &StorageConfig) -> Arc<dyn RecordStore> {
        Self::create_with_lifecycle(config, RecordLifecycle::default())
    }

    pub fn create_with_lifecycle(
        config: &StorageConfig,
        lifecycle: RecordLifecycle,
    ) -> Arc<dyn RecordStore> {
        match config {
            StorageConfig::File(file_config) => Arc::new(FileRecordStore::with_lifecycle(
                file_config.clone(),
                lifecycle,
            )),
            StorageConfig::InMemory {
                namespace,
                corruption,
            } => Arc::new(
                InMemoryRecordStore::with_namespace(namespace.clone())
                    .with_corruption_policy(*corruption)
                    .with_lifecycle(lifecycle),
            ),
        }
    }
}
