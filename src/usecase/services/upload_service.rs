use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domain::entities::record::{NewRecord, RecordId};
use crate::infra::import::read_objects;
use crate::usecase::ports::store::RecordStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub saved: usize,
    pub ids: Vec<RecordId>,
}

/// Saves every row of a sheet as a record, one store call per row.
pub struct UploadService {
    store: Arc<dyn RecordStore>,
    value_column: String,
}

impl UploadService {
    pub fn new(store: Arc<dyn RecordStore>, value_column: impl Into<String>) -> Self {
        Self {
            store,
            value_column: value_column.into(),
        }
    }

    pub fn upload(&self, path: &Path) -> Result<UploadSummary> {
        let objects = read_objects(path)
            .with_context(|| format!("failed to decode sheet: {}", path.display()))?;

        let mut ids = Vec::with_capacity(objects.len());
        for (idx, object) in objects.into_iter().enumerate() {
            let record = NewRecord::from_columns(object, &self.value_column);
            match self.store.add(record) {
                Ok(id) => ids.push(id),
                Err(err) => {
                    warn!(saved = ids.len(), row = idx + 1, "upload stopped early");
                    return Err(err).with_context(|| format!("failed to save row {}", idx + 1));
                }
            }
        }

        info!(
            backend = self.store.backend_name(),
            saved = ids.len(),
            file = %path.display(),
            "uploaded sheet"
        );
        Ok(UploadSummary {
            saved: ids.len(),
            ids,
        })
    }
}
