use thiserror::Error;

use crate::domain::entities::record::{NewRecord, Record, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(String),
    #[error("remote store returned {status}: {message}")]
    Remote { status: u16, message: String },
    #[error("failed to decode stored records: {0}")]
    Decode(String),
    #[error("record not found: {0}")]
    NotFound(RecordId),
    #[error("{0}")]
    Message(String),
}

/// A collection of records. Filtering always happens client-side after
/// `list_all`; backends only support whole-collection reads and single-record
/// writes.
pub trait RecordStore: Send + Sync {
    fn backend_name(&self) -> &'static str;

    fn init(&self) -> Result<(), StoreError>;

    fn list_all(&self) -> Result<Vec<Record>, StoreError>;
    fn add(&self, record: NewRecord) -> Result<RecordId, StoreError>;
    fn delete(&self, id: &RecordId) -> Result<(), StoreError>;
}
