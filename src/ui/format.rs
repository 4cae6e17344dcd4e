use chrono::{DateTime, Utc};

use crate::domain::entities::page::PageResult;
use crate::domain::entities::record::{ImportedRow, Record};
use crate::domain::reconcile::PartitionResult;
use crate::usecase::services::query_service::RecordSource;

pub fn page_label(page: &PageResult) -> String {
    format!("Page {} of {}", page.page, page.total_pages.max(1))
}

pub fn source_label(source: Option<RecordSource>) -> String {
    match source {
        None => String::new(),
        Some(RecordSource::Store) => String::new(),
        Some(RecordSource::OfflineSnapshot { saved_at }) => {
            format!("Offline copy from {}", format_timestamp(saved_at))
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn record_json(record: &Record) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| record.value.clone())
}

pub fn row_preview(row: &ImportedRow) -> String {
    row.join(" | ")
}

pub fn partition_summary(result: &PartitionResult) -> String {
    format!(
        "{} common, {} unmatched",
        result.common.len(),
        result.unmatched.len()
    )
}
