//! Typed views of the four tracked entities
//!
//! The store itself is untyped; these models give callers checked access to
//! the shapes the front-end writes.

mod dose_log;
mod medication;
mod reminder;
mod seizure;
mod typed;

pub use dose_log::{DoseLog, DoseStatus};
pub use medication::Medication;
pub use reminder::{MedicationReminder, Weekday};
pub use seizure::{Seizure, SeizureSeverity};
pub use typed::{from_record, to_record, Model, RecordMeta};
