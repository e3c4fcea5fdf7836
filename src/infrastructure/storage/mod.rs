//! Storage infrastructure - record store backends

mod factory;
mod file;
mod in_memory;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use file::{FileRecordStore, FileStoreConfig};
pub use in_memory::{InMemoryRecordStore, DEFAULT_NAMESPACE};
