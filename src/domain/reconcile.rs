//! Reconciliation of a freshly imported sheet against known records.
//!
//! Matching is exact string equality between an imported row's first cell and
//! a record's `value`. When several known records share a value, the one that
//! appears first in the known list is reported.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::record::{ImportedRow, Record, RecordId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionResult {
    /// Known records hit by an imported row, one entry per matching row.
    pub common: Vec<Record>,
    /// Imported rows whose first cell matched nothing.
    pub unmatched: Vec<ImportedRow>,
}

impl PartitionResult {
    pub fn total(&self) -> usize {
        self.common.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.unmatched.is_empty()
    }
}

/// One line of the side-by-side reconciliation export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRow {
    pub common: String,
    pub unmatched: String,
}

pub fn partition(imported_rows: &[ImportedRow], known_records: &[Record]) -> PartitionResult {
    let mut first_by_value: HashMap<&str, &Record> = HashMap::with_capacity(known_records.len());
    for record in known_records {
        first_by_value.entry(record.value.as_str()).or_insert(record);
    }

    let mut result = PartitionResult::default();
    for row in imported_rows {
        let Some(first_cell) = row.first() else {
            continue;
        };
        match first_by_value.get(first_cell.as_str()) {
            Some(record) => result.common.push((*record).clone()),
            None => result.unmatched.push(row.clone()),
        }
    }

    result
}

/// Drops every known record whose id appears in `common`. Records without an
/// id are never removed.
pub fn delete_common(known_records: &[Record], common: &[Record]) -> Vec<Record> {
    let doomed: HashSet<&RecordId> = common.iter().filter_map(|r| r.id.as_ref()).collect();

    known_records
        .iter()
        .filter(|record| match &record.id {
            Some(id) => !doomed.contains(id),
            None => true,
        })
        .cloned()
        .collect()
}

/// Distinct ids of `common` in first-seen order.
pub fn common_ids(common: &[Record]) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    common
        .iter()
        .filter_map(|record| record.id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

pub fn combine_for_export(common: &[Record], unmatched: &[ImportedRow]) -> Vec<ExportRow> {
    let len = common.len().max(unmatched.len());
    (0..len)
        .map(|idx| ExportRow {
            common: common
                .get(idx)
                .map(|record| record.value.clone())
                .unwrap_or_default(),
            unmatched: unmatched
                .get(idx)
                .and_then(|row| row.first().cloned())
                .unwrap_or_default(),
        })
        .collect()
}
