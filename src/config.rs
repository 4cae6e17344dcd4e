use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};

use crate::domain::entities::page::DEFAULT_PAGE_SIZE;
use crate::infra::remote::firestore::DEFAULT_FIRESTORE_URL;

pub const BACKEND_ENV: &str = "RECORDBOOK_BACKEND";
pub const DEFAULT_COLLECTION: &str = "excelData";
pub const DEFAULT_VALUE_COLUMN: &str = "data";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Local,
    Remote,
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Backend::Local),
            "remote" => Ok(Backend::Remote),
            other => Err(anyhow!("unknown backend '{other}' (expected 'local' or 'remote')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            base_url: DEFAULT_FIRESTORE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: Backend,
    /// Collection name; also the key of the local blob.
    pub collection: String,
    /// Header whose cell becomes a record's value.
    pub value_column: String,
    pub page_size: usize,
    pub export_dir: Option<PathBuf>,
    /// Keep a local copy of the last listing for offline display.
    pub offline_snapshot: bool,
    pub remote: RemoteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Local,
            collection: DEFAULT_COLLECTION.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: None,
            offline_snapshot: true,
            remote: RemoteConfig::default(),
        }
    }
}

impl AppConfig {
    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply_backend_override(&mut self, value: Option<&str>) -> Result<()> {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.backend = value
                .parse()
                .with_context(|| format!("invalid {BACKEND_ENV}"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than zero")
        }
        if self.collection.trim().is_empty() {
            anyhow::bail!("collection must not be empty")
        }
        if self.value_column.trim().is_empty() {
            anyhow::bail!("value_column must not be empty")
        }
        if self.backend == Backend::Remote && self.remote.project_id.trim().is_empty() {
            anyhow::bail!("remote backend requires remote.project_id")
        }
        Ok(())
    }

    /// Loads the config file and applies the environment override.
    pub fn resolve(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_backend_override(std::env::var(BACKEND_ENV).ok().as_deref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn export_dir_or_default(&self) -> Result<PathBuf> {
        match &self.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_export_dir(),
        }
    }
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "recordbook", "recordbook")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("records.sqlite"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn default_export_dir() -> Result<PathBuf> {
    if let Some(documents) = UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf)) {
        return Ok(documents.join("recordbook"));
    }
    Ok(project_dirs()?.data_local_dir().join("exports"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_dir).with_context(|| {
        format!(
            "failed to create webview data dir: {}",
            webview_dir.display()
        )
    })?;
    Ok(webview_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
