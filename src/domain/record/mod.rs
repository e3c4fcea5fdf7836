//! Record domain - untyped records, the entity registry, lifecycle and query shaping

mod entity;
mod lifecycle;
mod query;
mod registry;

pub use entity::{Record, CREATED_DATE_FIELD, ID_FIELD, UPDATED_DATE_FIELD};
pub use lifecycle::{
    format_timestamp, parse_timestamp, Clock, IdGenerator, RecordLifecycle, SystemClock,
    UuidGenerator,
};
pub use query::{compare_values, limit, sort, ListQuery, OrderBy};
pub use registry::EntityKind;

#[cfg(test)]
pub use lifecycle::testing;
