//! Domain layer - records, entity registry and the record store contract

pub mod error;
pub mod model;
pub mod record;
pub mod storage;

pub use error::DomainError;
pub use model::{DoseLog, DoseStatus, Medication, MedicationReminder, Model, Seizure, SeizureSeverity, Weekday};
pub use record::{EntityKind, ListQuery, OrderBy, Record, RecordLifecycle};
pub use storage::{CorruptionPolicy, RecordStore, Snapshot};
