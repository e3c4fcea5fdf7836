//! Storage domain - whole-collection record store abstraction

mod codec;
mod locks;
mod repository;
mod snapshot;

pub use codec::{decode_collection, encode_collection, CorruptionPolicy};
pub use locks::EntityLocks;
pub use repository::RecordStore;
pub use snapshot::{export_snapshot, import_snapshot, migrate, Snapshot};

#[cfg(test)]
pub use repository::mock;
