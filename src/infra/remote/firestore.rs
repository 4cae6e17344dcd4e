use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::RemoteConfig;
use crate::domain::entities::record::{Fields, NewRecord, Record, RecordId};
use crate::usecase::ports::store::{RecordStore, StoreError};

pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";
const LIST_PAGE_SIZE: &str = "300";
const USER_AGENT: &str = concat!("recordbook/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(rename = "nextPageToken", default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

/// Document collection served by the Firestore REST API.
///
/// The blocking client is built on first use so that it is created on the
/// worker thread that performs the request.
pub struct FirestoreStore {
    http: OnceLock<Client>,
    timeout: Duration,
    documents_url: String,
    collection: String,
    api_key: Option<String>,
    value_column: String,
}

impl FirestoreStore {
    pub fn new(remote: &RemoteConfig, collection: &str, value_column: &str) -> Result<Self> {
        if remote.project_id.trim().is_empty() {
            anyhow::bail!("remote backend requires remote.project_id")
        }
        let documents_url = format!(
            "{}/projects/{}/databases/(default)/documents",
            remote.base_url.trim_end_matches('/'),
            remote.project_id
        );
        Ok(Self::with_base_url(
            documents_url,
            collection,
            remote.api_key.clone(),
            value_column,
            Duration::from_secs(remote.timeout_secs),
        ))
    }

    pub fn with_base_url(
        documents_url: impl Into<String>,
        collection: &str,
        api_key: Option<String>,
        value_column: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            http: OnceLock::new(),
            timeout,
            documents_url: documents_url.into().trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            api_key,
            value_column: value_column.to_string(),
        }
    }

    fn client(&self) -> Result<Client, StoreError> {
        if let Some(client) = self.http.get() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")
            .map_err(|err| StoreError::Io(format!("{err:#}")))?;
        Ok(self.http.get_or_init(|| client).clone())
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.documents_url, self.collection)
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.query(&[("key", key.as_str())]),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Value, StoreError> {
        let response = self
            .with_key(request)
            .send()
            .map_err(|err| StoreError::Io(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|err| StoreError::Io(err.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| format!("HTTP {status}"));
            warn!(status = status.as_u16(), %message, "firestore request failed");
            return Err(StoreError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| StoreError::Decode(err.to_string()))
    }

    fn document_to_record(&self, document: Document) -> Record {
        let id = document_id(&document.name);
        let fields: Fields = document
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), firestore_value_to_string(value)))
            .collect();
        let value = fields.get(&self.value_column).cloned().unwrap_or_default();
        Record {
            id: Some(id),
            value,
            fields,
        }
    }
}

impl RecordStore for FirestoreStore {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client()?
                .get(self.collection_url())
                .query(&[("pageSize", LIST_PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let body = self.send(request)?;
            let page: ListDocumentsResponse = if body.is_null() {
                ListDocumentsResponse {
                    documents: Vec::new(),
                    next_page_token: None,
                }
            } else {
                serde_json::from_value(body).map_err(|err| StoreError::Decode(err.to_string()))?
            };

            records.extend(
                page.documents
                    .into_iter()
                    .map(|document| self.document_to_record(document)),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(collection = %self.collection, count = records.len(), "listed documents");
        Ok(records)
    }

    fn add(&self, record: NewRecord) -> Result<RecordId, StoreError> {
        let body = encode_fields(&record);
        let created = self.send(self.client()?.post(self.collection_url()).json(&body))?;
        let name = created
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode("created document has no name".to_string()))?;
        Ok(document_id(name))
    }

    fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.collection_url(), id.0);
        match self.send(self.client()?.delete(url)) {
            Ok(_) => Ok(()),
            Err(StoreError::Remote { status: 404, .. }) => Err(StoreError::NotFound(id.clone())),
            Err(err) => Err(err),
        }
    }
}

/// `projects/p/databases/(default)/documents/excelData/abc` -> `abc`
pub fn document_id(name: &str) -> RecordId {
    RecordId(name.rsplit('/').next().unwrap_or(name).to_string())
}

pub fn encode_fields(record: &NewRecord) -> Value {
    let fields: Map<String, Value> = record
        .fields
        .iter()
        .map(|(name, value)| (name.clone(), json!({ "stringValue": value })))
        .collect();
    json!({ "fields": fields })
}

pub fn firestore_value_to_string(value: &Value) -> String {
    let Some(object) = value.as_object() else {
        return value.to_string();
    };
    if let Some(text) = object.get("stringValue").and_then(Value::as_str) {
        return text.to_string();
    }
    if let Some(int) = object.get("integerValue") {
        return match int {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
    }
    if let Some(double) = object.get("doubleValue").and_then(Value::as_f64) {
        return double.to_string();
    }
    if let Some(flag) = object.get("booleanValue").and_then(Value::as_bool) {
        return flag.to_string();
    }
    if object.contains_key("nullValue") {
        return String::new();
    }
    if let Some(ts) = object.get("timestampValue").and_then(Value::as_str) {
        return ts.to_string();
    }
    value.to_string()
}
