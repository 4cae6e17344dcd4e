use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use tracing::{error, warn};

use crate::domain::entities::page::{paginate, PageQuery, PageResult};
use crate::domain::entities::record::Record;
use crate::infra::sqlite::snapshot::SnapshotCache;
use crate::usecase::ports::store::RecordStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Store,
    OfflineSnapshot { saved_at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRecords {
    pub records: Vec<Record>,
    pub source: RecordSource,
}

pub struct QueryService {
    store: Arc<dyn RecordStore>,
    cache: Option<SnapshotCache>,
    page_size: usize,
}

impl QueryService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Option<SnapshotCache>, page_size: usize) -> Self {
        Self {
            store,
            cache,
            page_size,
        }
    }

    /// Lists the store. A successful listing refreshes the offline snapshot;
    /// a failed one falls back to it when present.
    pub fn load_records(&self) -> Result<LoadedRecords> {
        match self.store.list_all() {
            Ok(records) => {
                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.save(&records) {
                        warn!("failed to refresh offline snapshot: {err:#}");
                    }
                }
                Ok(LoadedRecords {
                    records,
                    source: RecordSource::Store,
                })
            }
            Err(err) => {
                error!(backend = self.store.backend_name(), "failed to list records: {err}");
                let snapshot = match &self.cache {
                    Some(cache) => cache.load().unwrap_or_else(|cache_err| {
                        warn!("failed to read offline snapshot: {cache_err:#}");
                        None
                    }),
                    None => None,
                };
                match snapshot {
                    Some(snapshot) => Ok(LoadedRecords {
                        records: snapshot.records,
                        source: RecordSource::OfflineSnapshot {
                            saved_at: snapshot.saved_at,
                        },
                    }),
                    None => Err(anyhow!(err).context("failed to load records")),
                }
            }
        }
    }

    pub fn page(&self, records: &[Record], search: &str, page: usize) -> Result<PageResult> {
        paginate(
            records,
            &PageQuery {
                page,
                page_size: self.page_size,
                search: search.to_string(),
            },
        )
    }
}
