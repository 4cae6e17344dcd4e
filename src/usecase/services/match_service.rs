use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::entities::record::{ImportedRow, Record};
use crate::domain::reconcile::{common_ids, delete_common, partition, PartitionResult};
use crate::infra::import::read_rows;
use crate::usecase::ports::store::{RecordStore, StoreError};

pub struct MatchService {
    store: Arc<dyn RecordStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn load_known(&self) -> Result<Vec<Record>> {
        self.store
            .list_all()
            .context("failed to fetch existing data")
    }

    pub fn read_imported(&self, path: &Path) -> Result<Vec<ImportedRow>> {
        read_rows(path).with_context(|| format!("failed to decode sheet: {}", path.display()))
    }

    pub fn reconcile(&self, imported: &[ImportedRow], known: &[Record]) -> PartitionResult {
        let result = partition(imported, known);
        info!(
            imported = imported.len(),
            common = result.common.len(),
            unmatched = result.unmatched.len(),
            "reconciled sheet"
        );
        result
    }

    /// Deletes the common records from the store, then returns the known list
    /// without them. Records already gone from the store are not an error.
    pub fn delete_common(&self, known: &[Record], common: &[Record]) -> Result<Vec<Record>> {
        for id in common_ids(common) {
            match self.store.delete(&id) {
                Ok(()) => {}
                Err(StoreError::NotFound(_)) => {
                    warn!(%id, "record already removed");
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to delete record {id}"));
                }
            }
        }
        Ok(delete_common(known, common))
    }
}
