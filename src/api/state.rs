//! Application state shared by the handlers

use std::sync::Arc;

use crate::domain::RecordStore;
use crate::infrastructure::services::RecordService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub records: Arc<RecordService>,
}

impl AppState {
    pub fn new(records: RecordService) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// State backed directly by `store`
    pub fn from_store(store: Arc<dyn RecordStore>) -> Self {
        Self::new(RecordService::new(store))
    }
}
