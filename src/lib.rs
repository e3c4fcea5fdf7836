//! NeuroTrack API
//!
//! Personal seizure and medication tracking backed by a small generic record
//! store:
//! - Four entities: seizures, medications, medication reminders and dose logs
//! - List / create / update / delete with `order_by` and `limit` shaping
//! - File or in-memory storage, interchangeable through one trait
//! - Snapshot export/import between backends

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> AppState {
    let storage_config = config.storage.to_storage_config();

    info!(
        backend = ?storage_config.storage_type(),
        data_dir = %config.storage.data_dir.display(),
        strict = config.storage.strict,
        "Initializing record store"
    );

    AppState::from_store(StorageFactory::create(&storage_config))
}
