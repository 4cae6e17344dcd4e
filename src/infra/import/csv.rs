use std::path::Path;

use anyhow::{Context, Result};

/// Every record of a CSV file. The first line is data like any other; callers
/// decide whether it is a header.
pub fn read_csv_rows(csv_path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}
