use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::record::{NewRecord, Record, RecordId};
use crate::infra::sqlite::kv::{get_item, set_item};
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::snapshot::{decode_snapshot, encode_snapshot, CollectionSnapshot};
use crate::usecase::ports::store::{RecordStore, StoreError};

/// Keeps a collection as one JSON blob in the key-value table. Every write
/// rewrites the whole blob.
pub struct SqliteStore {
    pub db_path: PathBuf,
    pub collection: String,
}

impl SqliteStore {
    pub fn new(db_path: PathBuf, collection: impl Into<String>) -> Self {
        Self {
            db_path,
            collection: collection.into(),
        }
    }

    fn load(&self) -> Result<Vec<Record>, StoreError> {
        let stored = get_item(&self.db_path, &self.collection)
            .map_err(|err| StoreError::Io(format!("{err:#}")))?;
        match stored {
            Some(json) => decode_snapshot(&json)
                .map(|snapshot| snapshot.records)
                .map_err(|err| StoreError::Decode(err.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: Vec<Record>) -> Result<(), StoreError> {
        let json = encode_snapshot(&CollectionSnapshot::now(records))
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        set_item(&self.db_path, &self.collection, &json)
            .map_err(|err| StoreError::Io(format!("{err:#}")))
    }
}

impl RecordStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(|err| StoreError::Io(format!("{err:#}")))
    }

    fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        self.load()
    }

    fn add(&self, record: NewRecord) -> Result<RecordId, StoreError> {
        let mut records = self.load()?;
        let id = RecordId(Uuid::new_v4().to_string());
        records.push(record.into_record(id.clone()));
        self.save(records)?;
        debug!(collection = %self.collection, %id, "stored record");
        Ok(id)
    }

    fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|record| record.id.as_ref() != Some(id));
        if records.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        self.save(records)?;
        debug!(collection = %self.collection, %id, "deleted record");
        Ok(())
    }
}
