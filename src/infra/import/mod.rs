//! Spreadsheet decoding. Only the first sheet of a workbook is read.

pub mod csv;
pub mod xlsx;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::domain::entities::record::ImportedRow;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods", "csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> SheetFormat {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => SheetFormat::Csv,
            _ => SheetFormat::Workbook,
        }
    }
}

fn read_raw_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    match SheetFormat::from_path(path) {
        SheetFormat::Csv => csv::read_csv_rows(path),
        SheetFormat::Workbook => xlsx::read_first_sheet(path),
    }
}

/// Drops trailing empty cells, so a blank line becomes an empty row.
pub fn trim_row(mut row: Vec<String>) -> ImportedRow {
    while row.last().is_some_and(|cell| cell.is_empty()) {
        row.pop();
    }
    row
}

/// Rows as-is, the first row included.
pub fn read_rows(path: &Path) -> Result<Vec<ImportedRow>> {
    Ok(read_raw_rows(path)?.into_iter().map(trim_row).collect())
}

/// Rows keyed by the first row's headers, in column order. Empty cells are
/// left out and rows without any value are skipped.
pub fn read_objects(path: &Path) -> Result<Vec<Vec<(String, String)>>> {
    Ok(rows_to_objects(read_raw_rows(path)?))
}

pub fn rows_to_objects(rows: Vec<Vec<String>>) -> Vec<Vec<(String, String)>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = rows.into_iter();
    let Some(mut header_row) = rows.next() else {
        return Vec::new();
    };
    header_row.resize(width, String::new());
    let headers = header_names(&header_row);

    rows.filter_map(|row| {
        let object: Vec<(String, String)> = row
            .into_iter()
            .enumerate()
            .filter(|(_, value)| !value.is_empty())
            .map(|(idx, value)| (headers[idx].clone(), value))
            .collect();
        (!object.is_empty()).then_some(object)
    })
    .collect()
}

/// Blank headers become `__EMPTY`, `__EMPTY_1`, ...; repeated headers get a
/// `_n` suffix.
pub fn header_names(header_row: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header_row
        .iter()
        .map(|raw| {
            let base = if raw.trim().is_empty() {
                "__EMPTY".to_string()
            } else {
                raw.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}_{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

