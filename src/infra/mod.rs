pub mod export;
pub mod import;
pub mod remote;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::config::{AppConfig, Backend};
use crate::infra::remote::firestore::FirestoreStore;
use crate::infra::sqlite::store::SqliteStore;
use crate::usecase::ports::store::RecordStore;

/// Picks the record store named by the config.
pub fn open_store(config: &AppConfig, db_path: &Path) -> Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        Backend::Local => Arc::new(SqliteStore::new(
            db_path.to_path_buf(),
            config.collection.clone(),
        )),
        Backend::Remote => Arc::new(FirestoreStore::new(
            &config.remote,
            &config.collection,
            &config.value_column,
        )?),
    };
    Ok(store)
}
