use carbonlens::models::{Provenance, ResultRow, ResultSet, REGIONS};
use carbonlens::presentation::{Column, ResultTable, SortDirection};
use carbonlens::services::fallback_estimate;

fn fallback_results(energy: f64) -> ResultSet {
    let rows = REGIONS
        .iter()
        .map(|region| ResultRow {
            region: *region,
            result: fallback_estimate(region.region_code, energy),
            provenance: Provenance::Fallback,
        })
        .collect();
    ResultSet::new(energy, rows)
}

fn column_values(table: &ResultTable, column: Column) -> Vec<String> {
    table.rows().iter().map(|r| r.cell(column).to_string()).collect()
}

#[test]
fn test_rows_use_eight_formatted_columns() {
    let table = ResultTable::from_results(&fallback_results(100.0));
    let first = &table.rows()[0];
    assert_eq!(
        first.cells,
        [
            "India Flag India".to_string(),
            "IN".to_string(),
            "82.000".to_string(),
            "80.360".to_string(),
            "0.08200".to_string(),
            "0.04100".to_string(),
            "2024".to_string(),
            "Regional Avg (Fallback)".to_string(),
        ]
    );
}

#[test]
fn test_sorting_total_twice_restores_initial_order() {
    let results = fallback_results(100.0);
    let mut table = ResultTable::from_results(&results);
    let initial = column_values(&table, Column::Region);

    table.sort_by(Column::Total);
    let ascending = column_values(&table, Column::Region);
    let mut reversed = initial.clone();
    reversed.reverse();
    assert_eq!(ascending, reversed);

    table.sort_by(Column::Total);
    assert_eq!(column_values(&table, Column::Region), initial);
    assert_eq!(table.last_sorted(), Some((Column::Total, SortDirection::Descending)));
    assert_eq!(table.marker(Column::Total), "▼");
    assert_eq!(table.marker(Column::Region), "");
}

#[test]
fn test_same_column_alternates_direction() {
    let mut table = ResultTable::from_results(&fallback_results(10.0));

    table.sort_by(Column::Country);
    let first = column_values(&table, Column::Country);
    assert_eq!(first[0], "Australia Flag Australia");
    assert_eq!(table.last_sorted(), Some((Column::Country, SortDirection::Ascending)));
    assert_eq!(table.marker(Column::Country), "▲");

    table.sort_by(Column::Country);
    let second = column_values(&table, Column::Country);
    let mut expected = first.clone();
    expected.reverse();
    assert_eq!(second, expected);
    assert_eq!(table.marker(Column::Country), "▼");

    table.sort_by(Column::Country);
    assert_eq!(column_values(&table, Column::Country), first);
    assert_eq!(table.marker(Column::Country), "▲");
}

#[test]
fn test_switching_columns_starts_ascending() {
    let mut table = ResultTable::from_results(&fallback_results(10.0));
    table.sort_by(Column::Region);
    table.sort_by(Column::Ch4);
    let ch4: Vec<f64> = column_values(&table, Column::Ch4)
        .iter()
        .map(|v| v.parse().unwrap())
        .collect();
    assert!(ch4.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(table.last_sorted(), Some((Column::Ch4, SortDirection::Ascending)));
}

#[test]
fn test_numeric_sort_is_not_lexical() {
    // 9.000 would sort after 82.000 as text
    let mut table = ResultTable::from_results(&fallback_results(100.0));
    table.sort_by(Column::Total);
    let totals = column_values(&table, Column::Total);
    assert_eq!(totals[0], "6.000");
    assert_eq!(totals[1], "9.000");
    assert_eq!(totals[9], "82.000");
}

#[test]
fn test_filter_absent_query_hides_everything() {
    let mut table = ResultTable::from_results(&fallback_results(100.0));
    table.filter("atlantis");
    assert_eq!(table.visible_count(), 0);
    assert!(table.rows().iter().all(|r| !r.visible));
}

#[test]
fn test_filter_empty_query_shows_everything() {
    let mut table = ResultTable::from_results(&fallback_results(100.0));
    table.filter("germany");
    table.filter("");
    assert_eq!(table.visible_count(), REGIONS.len());
}

#[test]
fn test_filter_is_case_insensitive_over_all_cells() {
    let mut table = ResultTable::from_results(&fallback_results(100.0));

    table.filter("GERMANY");
    let visible: Vec<&str> = table.visible_rows().map(|r| r.cell(Column::Region)).collect();
    assert_eq!(visible, vec!["DE"]);

    table.filter("us-mi");
    assert_eq!(table.visible_count(), 1);

    table.filter("fallback");
    assert_eq!(table.visible_count(), REGIONS.len());

    table.filter("82.000");
    assert_eq!(table.visible_count(), 1);
}

#[test]
fn test_filter_and_sort_leave_results_untouched() {
    let results = fallback_results(100.0);
    let before = results.rows.clone();
    let mut table = ResultTable::from_results(&results);
    table.filter("an");
    table.sort_by(Column::Source);
    table.sort_by(Column::Year);
    assert_eq!(results.rows, before);
}

#[test]
fn test_sort_keeps_filter_visibility() {
    let mut table = ResultTable::from_results(&fallback_results(100.0));
    table.filter("united");
    table.sort_by(Column::Total);
    let visible: Vec<&str> = table.visible_rows().map(|r| r.cell(Column::Region)).collect();
    assert_eq!(visible, vec!["GB"]);
    assert_eq!(table.rows().len(), REGIONS.len());
}
