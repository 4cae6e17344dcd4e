use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::domain::entities::record::{ImportedRow, Record};
use crate::domain::reconcile::combine_for_export;
use crate::infra::export::xlsx::{export_rows_table, records_table, write_table};

pub const RECORDS_FILE: &str = "exported_data.xlsx";
pub const COMMON_FILE: &str = "common_data.xlsx";
pub const MATCH_FILE: &str = "match_result.xlsx";

pub struct ExportService {
    export_dir: PathBuf,
    value_column: String,
}

impl ExportService {
    pub fn new(export_dir: PathBuf, value_column: impl Into<String>) -> Self {
        Self {
            export_dir,
            value_column: value_column.into(),
        }
    }

    pub fn export_records(&self, records: &[Record]) -> Result<PathBuf> {
        let (headers, rows) = records_table(records, &self.value_column);
        self.write(RECORDS_FILE, &headers, &rows)
    }

    pub fn export_common(&self, common: &[Record]) -> Result<PathBuf> {
        let (headers, rows) = records_table(common, &self.value_column);
        self.write(COMMON_FILE, &headers, &rows)
    }

    pub fn export_match(&self, common: &[Record], unmatched: &[ImportedRow]) -> Result<PathBuf> {
        let (headers, rows) = export_rows_table(&combine_for_export(common, unmatched));
        self.write(MATCH_FILE, &headers, &rows)
    }

    fn write(&self, file_name: &str, headers: &[String], rows: &[Vec<String>]) -> Result<PathBuf> {
        let path = self.export_dir.join(file_name);
        write_table(&path, headers, rows)?;
        info!(file = %path.display(), rows = rows.len(), "exported workbook");
        Ok(path)
    }
}
