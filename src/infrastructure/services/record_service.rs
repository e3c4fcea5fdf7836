//! Record service - entity-name dispatch, query shaping and typed access over a record store

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::model::{from_record, to_record, Model};
use crate::domain::record::{EntityKind, ListQuery, Record};
use crate::domain::{DomainError, RecordStore};
use crate::infrastructure::observability::record_store_operation;

/// Outcome of deleting a medication together with its reminders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeDeleteResult {
    pub medication_id: String,
    pub reminders_deleted: usize,
}

/// Boundary-facing facade over one record store
#[derive(Debug, Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    /// Create a new RecordService over the given store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// List an entity's records, sorted and truncated as requested
    pub async fn list(&self, entity: &str, query: &ListQuery) -> Result<Vec<Record>, DomainError> {
        let result = self.list_inner(entity, query).await;
        track(entity, "list", &result);
        result
    }

    /// Create a record from a JSON object body
    pub async fn create(&self, entity: &str, body: Value) -> Result<Record, DomainError> {
        let result = self.create_inner(entity, body).await;
        track(entity, "create", &result);
        result
    }

    /// Merge a JSON object body over an existing record
    pub async fn update(&self, entity: &str, id: &str, body: Value) -> Result<Record, DomainError> {
        let result = self.update_inner(entity, id, body).await;
        track(entity, "update", &result);
        result
    }

    /// Delete a record by ID
    pub async fn delete(&self, entity: &str, id: &str) -> Result<(), DomainError> {
        let result = self.delete_inner(entity, id).await;
        track(entity, "delete", &result);
        result
    }

    /// List records of a typed model
    pub async fn list_as<T: Model>(&self, query: &ListQuery) -> Result<Vec<T>, DomainError> {
        let records = query.apply(self.store.list(T::KIND).await?);
        records.into_iter().map(from_record).collect()
    }

    /// Create a record from a typed model; identity fields on `model` are ignored
    pub async fn create_as<T: Model>(&self, model: &T) -> Result<T, DomainError> {
        let record = self.store.create(T::KIND, to_record(model)?).await?;
        from_record(record)
    }

    /// Deletes a medication, then each reminder pointing at it.
    ///
    /// The steps are independent store calls: a failure part-way leaves the
    /// medication deleted and any remaining reminders in place.
    pub async fn delete_medication_cascade(
        &self,
        medication_id: &str,
    ) -> Result<CascadeDeleteResult, DomainError> {
        self.delete(EntityKind::Medication.as_str(), medication_id)
            .await?;

        let reminders = self.store.list(EntityKind::MedicationReminder).await?;
        let mut reminders_deleted = 0;

        for reminder in reminders
            .iter()
            .filter(|r| r.get_str("medication_id") == Some(medication_id))
        {
            let Some(reminder_id) = reminder.id() else {
                continue;
            };

            match self
                .store
                .delete(EntityKind::MedicationReminder, reminder_id)
                .await
            {
                Ok(()) => reminders_deleted += 1,
                // Already removed by another caller.
                Err(DomainError::RecordNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        info!(
            medication_id = %medication_id,
            reminders_deleted,
            "Deleted medication and its reminders"
        );

        Ok(CascadeDeleteResult {
            medication_id: medication_id.to_string(),
            reminders_deleted,
        })
    }

    async fn list_inner(&self, entity: &str, query: &ListQuery) -> Result<Vec<Record>, DomainError> {
        let kind = EntityKind::resolve(entity)?;
        let records = self.store.list(kind).await?;

        debug!(entity = %kind, total = records.len(), ?query, "Listing records");
        Ok(query.apply(records))
    }

    async fn create_inner(&self, entity: &str, body: Value) -> Result<Record, DomainError> {
        let kind = EntityKind::resolve(entity)?;
        let fields = Record::from_value(body)?;
        self.store.create(kind, fields).await
    }

    async fn update_inner(&self, entity: &str, id: &str, body: Value) -> Result<Record, DomainError> {
        let kind = EntityKind::resolve(entity)?;
        let fields = Record::from_value(body)?;
        self.store.update(kind, id, fields).await
    }

    async fn delete_inner(&self, entity: &str, id: &str) -> Result<(), DomainError> {
        let kind = EntityKind::resolve(entity)?;
        self.store.delete(kind, id).await
    }
}

fn track<T>(entity: &str, operation: &'static str, result: &Result<T, DomainError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(DomainError::UnknownEntity { .. }) => "unknown_entity",
        Err(DomainError::RecordNotFound { .. }) => "not_found",
        Err(DomainError::Validation { .. }) => "invalid",
        Err(_) => "error",
    };

    // Unknown names are caller input; keep them out of metric labels.
    let label = match result {
        Err(DomainError::UnknownEntity { .. }) => "unknown",
        _ => entity,
    };

    record_store_operation(label, operation, outcome);
}
