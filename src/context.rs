use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{AppConfig, Backend};
use crate::infra::open_store;
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::snapshot::SnapshotCache;
use crate::usecase::ports::store::RecordStore;
use crate::usecase::services::export_service::ExportService;
use crate::usecase::services::match_service::MatchService;
use crate::usecase::services::query_service::QueryService;
use crate::usecase::services::upload_service::UploadService;

/// Everything the screens need, shared through the component context.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn RecordStore>,
    pub upload: Arc<UploadService>,
    pub query: Arc<QueryService>,
    pub matching: Arc<MatchService>,
    pub export: Arc<ExportService>,
}

impl AppContext {
    pub fn build(config: AppConfig, db_path: &Path, export_dir: PathBuf) -> Result<Self> {
        init_db(db_path).context("failed to initialize local database")?;
        let store = open_store(&config, db_path)?;
        store
            .init()
            .with_context(|| format!("failed to initialize {} store", store.backend_name()))?;

        // The local backend already is the offline copy.
        let cache = (config.offline_snapshot && config.backend == Backend::Remote)
            .then(|| SnapshotCache::new(db_path.to_path_buf(), &config.collection));

        info!(
            backend = store.backend_name(),
            collection = %config.collection,
            db = %db_path.display(),
            "record store ready"
        );

        Ok(Self {
            upload: Arc::new(UploadService::new(store.clone(), config.value_column.clone())),
            query: Arc::new(QueryService::new(store.clone(), cache, config.page_size)),
            matching: Arc::new(MatchService::new(store.clone())),
            export: Arc::new(ExportService::new(export_dir, config.value_column.clone())),
            store,
            config: Arc::new(config),
        })
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}
