use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;

use crate::domain::entities::record::Record;
use crate::domain::reconcile::ExportRow;

pub const SHEET_NAME: &str = "Sheet1";

pub type Table = (Vec<String>, Vec<Vec<String>>);

/// Writes a single-sheet workbook: header row, then data rows. Empty strings
/// are left as blank cells.
pub fn write_table(path: &Path, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .context("failed to name worksheet")?;

    for (col_idx, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, header.as_str())
            .context("failed to write header cell")?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string(row_idx as u32 + 1, col_idx as u16, value.as_str())
                .context("failed to write data cell")?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save workbook: {}", path.display()))?;
    Ok(())
}

/// A record's columns in sheet order. A record without its value column
/// (built with no fields) exports the value under that name.
fn record_columns(record: &Record, value_column: &str) -> Vec<(String, String)> {
    let mut columns = Vec::with_capacity(record.fields.len() + 1);
    if !record.fields.contains(value_column) {
        columns.push((value_column.to_string(), record.value.clone()));
    }
    columns.extend(
        record
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );
    columns
}

/// `id`, then every column name in first-seen order.
pub fn records_table(records: &[Record], value_column: &str) -> Table {
    let columns: Vec<Vec<(String, String)>> = records
        .iter()
        .map(|record| record_columns(record, value_column))
        .collect();

    let mut headers = vec!["id".to_string()];
    for record_columns in &columns {
        for (name, _) in record_columns {
            if !headers.iter().skip(1).any(|existing| existing == name) {
                headers.push(name.clone());
            }
        }
    }

    let rows = records
        .iter()
        .zip(&columns)
        .map(|(record, record_columns)| {
            let mut row = Vec::with_capacity(headers.len());
            row.push(record.id.as_ref().map(|id| id.0.clone()).unwrap_or_default());
            for name in headers.iter().skip(1) {
                let cell = record_columns
                    .iter()
                    .find(|(column, _)| column == name)
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default();
                row.push(cell);
            }
            row
        })
        .collect();

    (headers, rows)
}

pub fn export_rows_table(rows: &[ExportRow]) -> Table {
    let headers = vec!["Common Data".to_string(), "Unmatched Data".to_string()];
    let rows = rows
        .iter()
        .map(|row| vec![row.common.clone(), row.unmatched.clone()])
        .collect();
    (headers, rows)
}
