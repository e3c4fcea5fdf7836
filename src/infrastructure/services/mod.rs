//! Application services

mod record_service;

pub use record_service::{CascadeDeleteResult, RecordService};
