use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::record::Record;
use crate::infra::sqlite::kv::{get_item, set_item};
use crate::infra::sqlite::schema::init_db;

/// A whole collection as stored under a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub saved_at: DateTime<Utc>,
    pub records: Vec<Record>,
}

impl CollectionSnapshot {
    pub fn now(records: Vec<Record>) -> Self {
        Self {
            saved_at: Utc::now(),
            records,
        }
    }
}

pub fn encode_snapshot(snapshot: &CollectionSnapshot) -> serde_json::Result<String> {
    serde_json::to_string(snapshot)
}

pub fn decode_snapshot(json: &str) -> serde_json::Result<CollectionSnapshot> {
    serde_json::from_str(json)
}

/// Offline copy of the last records listed from the active store.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    db_path: PathBuf,
    key: String,
}

impl SnapshotCache {
    pub fn new(db_path: PathBuf, collection: &str) -> Self {
        Self {
            db_path,
            key: format!("{collection}.snapshot"),
        }
    }

    pub fn save(&self, records: &[Record]) -> Result<()> {
        init_db(&self.db_path)?;
        let json = encode_snapshot(&CollectionSnapshot::now(records.to_vec()))
            .context("failed to encode snapshot")?;
        set_item(&self.db_path, &self.key, &json)
    }

    pub fn load(&self) -> Result<Option<CollectionSnapshot>> {
        init_db(&self.db_path)?;
        match get_item(&self.db_path, &self.key)? {
            Some(json) => decode_snapshot(&json)
                .map(Some)
                .with_context(|| format!("failed to decode snapshot: {}", self.key)),
            None => Ok(None),
        }
    }
}
