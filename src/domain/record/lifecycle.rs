//! Record lifecycle policy - identity and timestamp stamping

use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use uuid::Uuid;

use super::entity::{Record, CREATED_DATE_FIELD, ID_FIELD, UPDATED_DATE_FIELD};

/// Source of the current instant
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Generator of opaque, globally unique record ids
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> String;
}

/// Random UUID v4 ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Formats an instant the way records store it: `2024-03-01T10:00:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Stamps ids and timestamps on created and updated records.
///
/// `id` and `created_date` are written once at creation and restored verbatim
/// on every update. `updated_date` on update is always strictly later than the
/// value it replaces.
#[derive(Debug, Clone)]
pub struct RecordLifecycle {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl Default for RecordLifecycle {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl RecordLifecycle {
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Arc::new(UuidGenerator))
    }

    /// Builds a new record from caller fields; caller-supplied identity fields are overwritten
    pub fn stamp_new(&self, fields: Record) -> Record {
        let now = format_timestamp(self.now_millis());
        let mut record = fields;

        record.insert(ID_FIELD, self.ids.generate());
        record.insert(CREATED_DATE_FIELD, now.clone());
        record.insert(UPDATED_DATE_FIELD, now);
        record
    }

    /// Shallow-merges caller fields over `existing`, keeping its identity
    pub fn apply_update(&self, existing: &Record, fields: Record) -> Record {
        let mut record = existing.clone();
        record.merge(fields);

        restore_field(&mut record, existing, ID_FIELD);
        restore_field(&mut record, existing, CREATED_DATE_FIELD);

        let stamp = self.next_update_stamp(existing.updated_date());
        record.insert(UPDATED_DATE_FIELD, stamp);
        record
    }

    fn next_update_stamp(&self, previous: Option<&str>) -> String {
        let now = self.now_millis();

        let stamp = match previous.and_then(parse_timestamp) {
            Some(previous) if now <= previous => previous + Duration::milliseconds(1),
            _ => now,
        };

        format_timestamp(stamp)
    }

    fn now_millis(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }
}

fn restore_field(record: &mut Record, original: &Record, field: &str) {
    match original.get(field) {
        Some(value) => {
            record.insert(field, value.clone());
        }
        None => {
            record.remove(field);
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Clock frozen at a settable instant
    #[derive(Debug)]
    pub struct FixedClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl FixedClock {
        pub fn at(rfc3339: &str) -> Self {
            Self {
                now: Mutex::new(parse_timestamp(rfc3339).expect("valid test timestamp")),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    /// Deterministic `rec-1`, `rec-2`, ... ids
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicUsize,
    }

    impl IdGenerator for SequentialIds {
        fn generate(&self) -> String {
            format!("rec-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }
}
