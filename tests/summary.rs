mod common;

use common::{strings, table};
use vic_crime_series::DataError;
use vic_crime_series::model::{Cell, Table};
use vic_crime_series::summary::{lga_summary, offence_trends};

const TREND_HEADER: &[&str] = &["year", "offence_division", "incidents_recorded"];

/// One (year, division, incidents) row; `None` leaves the cell missing.
fn trend_row(year: Option<i64>, division: &str, incidents: Option<i64>) -> Vec<Cell> {
    vec![year.into(), division.into(), incidents.into()]
}

fn summary_input(rows: &[(i64, &str, Option<i64>)]) -> Table {
    let rows = rows
        .iter()
        .map(|&(year, lga, incidents)| vec![year.into(), lga.into(), incidents.into()])
        .collect();
    table(&["year", "lga_name", "incidents_recorded"], rows)
}

#[test]
fn offence_trend_reports_year_over_year_change() {
    let input = table(
        TREND_HEADER,
        vec![
            trend_row(Some(2015), "A", Some(100)),
            trend_row(Some(2016), "A", Some(150)),
        ],
    );
    let trends = offence_trends(&input).expect("trends computed");

    assert_eq!(
        trends.column_names(),
        vec![
            "year",
            "offence_division",
            "incidents_recorded",
            "yoy_change",
        ]
    );
    assert_eq!(trends.cell("yoy_change", 0), Some(&Cell::Empty));
    assert_eq!(trends.cell("yoy_change", 1), Some(&Cell::Float(50.0)));
}

#[test]
fn offence_trend_sums_and_orders_by_division_then_year() {
    let input = table(
        TREND_HEADER,
        vec![
            trend_row(Some(2017), "B", Some(40)),
            trend_row(Some(2016), "B", Some(10)),
            trend_row(Some(2016), "B", Some(10)),
            trend_row(Some(2016), "A", Some(5)),
            trend_row(Some(2017), "A", None),
            trend_row(None, "A", Some(99)),
        ],
    );
    let trends = offence_trends(&input).expect("trends computed");

    let divisions = strings(&trends, "offence_division");
    assert_eq!(divisions, vec!["A", "A", "B", "B"]);
    let years = strings(&trends, "year");
    assert_eq!(years, vec!["2016", "2017", "2016", "2017"]);
    let totals = strings(&trends, "incidents_recorded");
    assert_eq!(totals, vec!["5", "0", "20", "40"]);
    // A: 5 -> 0 is -100%, B restarts at its first year.
    assert_eq!(trends.cell("yoy_change", 1), Some(&Cell::Float(-100.0)));
    assert_eq!(trends.cell("yoy_change", 2), Some(&Cell::Empty));
    assert_eq!(trends.cell("yoy_change", 3), Some(&Cell::Float(100.0)));
}

#[test]
fn offence_trend_is_missing_after_a_zero_year() {
    let input = table(
        TREND_HEADER,
        vec![
            trend_row(Some(2015), "C", Some(0)),
            trend_row(Some(2016), "C", Some(8)),
        ],
    );
    let trends = offence_trends(&input).expect("trends computed");
    assert_eq!(trends.cell("yoy_change", 1), Some(&Cell::Empty));
}

#[test]
fn offence_trend_needs_a_division_column() {
    let input = table(
        &["year", "incidents_recorded"],
        vec![vec![Cell::Int(2015), Cell::Int(1)]],
    );
    match offence_trends(&input) {
        Err(DataError::MissingColumn(column)) => assert_eq!(column, "offence_division"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn lga_summary_aggregates_incidents_per_year_and_lga() {
    let input = summary_input(&[
        (2016, "Yarra", Some(10)),
        (2015, "Yarra", Some(4)),
        (2015, "Yarra", Some(6)),
        (2015, "Yarra", None),
        (2015, "Alpine", Some(1)),
    ]);
    let summary = lga_summary(&input, None).expect("summary computed");

    assert_eq!(
        summary.column_names(),
        vec![
            "year",
            "lga_name",
            "incidents_recorded_sum",
            "incidents_recorded_mean",
            "incidents_recorded_count",
        ]
    );
    let lgas = strings(&summary, "lga_name");
    assert_eq!(lgas, vec!["Alpine", "Yarra", "Yarra"]);
    let cell = |column: &str, row: usize| summary.cell(column, row).cloned();
    assert_eq!(cell("incidents_recorded_sum", 1), Some(Cell::Int(10)));
    assert_eq!(cell("incidents_recorded_mean", 1), Some(Cell::Float(5.0)));
    assert_eq!(cell("incidents_recorded_count", 1), Some(Cell::Int(2)));
    assert_eq!(cell("incidents_recorded_sum", 2), Some(Cell::Int(10)));
}

#[test]
fn lga_summary_counts_rows_without_incidents() {
    let input = table(
        &["year", "lga_name", "suburb"],
        vec![
            vec![Cell::Int(2015), Cell::from("Yarra"), Cell::from("Fitzroy")],
            vec![Cell::Int(2015), Cell::from("Yarra"), Cell::from("Richmond")],
            vec![Cell::Int(2016), Cell::from("Yarra"), Cell::from("Fitzroy")],
        ],
    );
    let groups: &[&str] = &["lga_name", "police_region"];
    let summary = lga_summary(&input, Some(groups)).expect("summary");

    assert_eq!(summary.column_names(), vec!["lga_name", "count"]);
    assert_eq!(summary.height(), 1);
    assert_eq!(summary.cell("count", 0), Some(&Cell::Int(3)));
}

#[test]
fn lga_summary_without_any_group_column_fails() {
    let input = table(&["suburb"], vec![vec![Cell::from("Fitzroy")]]);
    let result = lga_summary(&input, None);
    assert!(matches!(result, Err(DataError::MissingColumn(_))));
}
