// Property-based tests for the reconciler.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use proptest::prelude::*;
use recordbook::domain::entities::page::{paginate, PageQuery};
use recordbook::domain::entities::record::{ImportedRow, Record};
use recordbook::domain::reconcile::*;

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Small alphabet so imported rows and known values collide often.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[A-E]",
        1 => "[a-z]{2,6}",
        1 => Just(String::new()),
    ]
}

fn arb_row() -> impl Strategy<Value = ImportedRow> {
    prop_oneof![
        1 => Just(Vec::new()),
        6 => prop::collection::vec(arb_value(), 1..4),
    ]
}

fn arb_rows() -> impl Strategy<Value = Vec<ImportedRow>> {
    prop::collection::vec(arb_row(), 0..30)
}

fn arb_known() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_value(), 0..20).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| Record::new(format!("id-{idx}"), value))
            .collect()
    })
}

fn non_empty(rows: &[ImportedRow]) -> Vec<ImportedRow> {
    rows.iter().filter(|row| !row.is_empty()).cloned().collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn disjoint_values_leave_everything_unmatched(
        known in prop::collection::vec("[a-m]{1,4}", 0..15),
        rows in prop::collection::vec(prop::collection::vec("[n-z]{1,4}", 0..3), 0..20),
    ) {
        let known: Vec<Record> = known
            .into_iter()
            .enumerate()
            .map(|(idx, value)| Record::new(format!("id-{idx}"), value))
            .collect();

        let result = partition(&rows, &known);

        prop_assert!(result.common.is_empty());
        prop_assert_eq!(result.unmatched, non_empty(&rows));
    }

    #[test]
    fn matching_rows_land_in_common_in_order(known in arb_known(), rows in arb_rows()) {
        let result = partition(&rows, &known);

        let expected: Vec<Record> = rows
            .iter()
            .filter_map(|row| row.first())
            .filter_map(|cell| known.iter().find(|record| &record.value == cell))
            .cloned()
            .collect();
        prop_assert_eq!(&result.common, &expected);

        let known_values: HashSet<&str> = known.iter().map(|r| r.value.as_str()).collect();
        for row in &result.unmatched {
            prop_assert!(!known_values.contains(row[0].as_str()));
        }
    }

    #[test]
    fn output_never_exceeds_non_empty_rows(known in arb_known(), rows in arb_rows()) {
        let result = partition(&rows, &known);
        prop_assert_eq!(result.total(), non_empty(&rows).len());
        prop_assert!(result.total() <= rows.len());
    }

    #[test]
    fn delete_common_is_idempotent(known in arb_known(), rows in arb_rows()) {
        let common = partition(&rows, &known).common;

        let once = delete_common(&known, &common);
        let twice = delete_common(&once, &common);

        prop_assert_eq!(&once, &twice);
        for record in &once {
            prop_assert!(!common.iter().any(|c| c.id == record.id));
        }
    }

    #[test]
    fn delete_common_keeps_unsaved_records(values in prop::collection::vec("[A-C]", 0..10)) {
        let known: Vec<Record> = values.iter().map(Record::unsaved).collect();
        let common = known.clone();

        prop_assert_eq!(delete_common(&known, &common), known);
    }

    #[test]
    fn combined_export_is_as_long_as_the_longer_side(known in arb_known(), rows in arb_rows()) {
        let result = partition(&rows, &known);
        let combined = combine_for_export(&result.common, &result.unmatched);

        prop_assert_eq!(combined.len(), result.common.len().max(result.unmatched.len()));
        for (row, record) in combined.iter().zip(&result.common) {
            prop_assert_eq!(&row.common, &record.value);
        }
    }

    #[test]
    fn paginate_clamps_and_counts_pages(
        count in 0usize..60,
        page in 0usize..20,
        page_size in 1usize..15,
    ) {
        let records: Vec<Record> = (0..count)
            .map(|idx| Record::new(format!("id-{idx}"), format!("v{idx}")))
            .collect();
        let query = PageQuery { page, page_size, search: String::new() };

        let result = paginate(&records, &query).expect("non-zero page size");

        prop_assert_eq!(result.total_pages, count.div_ceil(page_size));
        prop_assert!(result.page >= 1);
        prop_assert!(result.page <= result.total_pages.max(1));
        prop_assert!(result.records.len() <= page_size);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_one_match_one_miss() {
    let known = vec![Record::new("a", "X"), Record::new("b", "Y")];
    let rows = vec![vec!["X".to_string()], vec!["Z".to_string()]];

    let result = partition(&rows, &known);

    assert_eq!(result.common, vec![Record::new("a", "X")]);
    assert_eq!(result.unmatched, vec![vec!["Z".to_string()]]);
}

#[test]
fn scenario_empty_row_is_ignored() {
    let known = vec![Record::new("a", "X"), Record::new("b", "Y")];
    let rows = vec![vec!["X".to_string()], Vec::new(), vec!["Y".to_string()]];

    let result = partition(&rows, &known);

    assert_eq!(result.total(), 2);
    assert!(result.unmatched.is_empty());
}

#[test]
fn combine_for_export_of_nothing_is_empty() {
    assert!(combine_for_export(&[], &[]).is_empty());
}
