use anyhow::Result;

use crate::domain::entities::record::Record;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number as shown to the user.
    pub page: usize,
    pub page_size: usize,
    pub search: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub records: Vec<Record>,
    pub page: usize,
    pub total_pages: usize,
    /// Records left after the search filter.
    pub matching: usize,
    /// Records before filtering.
    pub total: usize,
}

impl PageResult {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} items (Total: {})",
            self.records.len(),
            self.matching,
            self.total
        )
    }
}

/// Case-insensitive substring match over the id, the value and every field
/// value. Column names are not searched.
pub fn record_matches(record: &Record, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    record
        .id
        .iter()
        .map(|id| &id.0)
        .chain(std::iter::once(&record.value))
        .chain(record.fields.values())
        .any(|text| text.to_lowercase().contains(needle_lower))
}

pub fn filter_records<'a>(records: &'a [Record], search: &str) -> Vec<&'a Record> {
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}

pub fn paginate(records: &[Record], query: &PageQuery) -> Result<PageResult> {
    if query.page_size == 0 {
        anyhow::bail!("page_size must be greater than zero")
    }

    let filtered = filter_records(records, &query.search);
    let matching = filtered.len();
    let total_pages = matching.div_ceil(query.page_size);
    let page = query.page.clamp(1, total_pages.max(1));
    let start = (page - 1) * query.page_size;

    let page_records = filtered
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .cloned()
        .collect();

    Ok(PageResult {
        records: page_records,
        page,
        total_pages,
        matching,
        total: records.len(),
    })
}
