//! User-record persistence

pub mod json_store;
pub mod records;

// Re-exports for convenience
pub use json_store::JsonFileStore;
pub use records::{ProfileRecord, RecordStore, UserRecords};
