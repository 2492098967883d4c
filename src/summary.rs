//! Group-by summaries over a standardized or merged table.

use std::collections::BTreeMap;

use crate::error::{DataError, Result};
use crate::model::{Cell, Column, Table, columns};

/// Group columns used by [`lga_summary`] when the caller gives none.
pub const DEFAULT_SUMMARY_GROUPS: &[&str] = &[columns::YEAR, columns::LGA_NAME];

/// Summarises incidents per group.
///
/// Requested group columns the table lacks are ignored. With an
/// `incidents_recorded` column the result carries `incidents_recorded_sum`,
/// `incidents_recorded_mean` and `incidents_recorded_count`; without one it
/// carries a row `count`. Rows with a missing group key are left out and
/// groups come back in key order.
pub fn lga_summary(table: &Table, group_cols: Option<&[&str]>) -> Result<Table> {
    let requested = group_cols.unwrap_or(DEFAULT_SUMMARY_GROUPS);
    let keys: Vec<&Column> = requested
        .iter()
        .filter_map(|name| table.column(name))
        .collect();
    if keys.is_empty() {
        return Err(DataError::MissingColumn(requested.join(", ")));
    }

    let groups = group_rows(table, &keys);
    let mut output = key_columns(&keys, &groups);

    match table.column(columns::INCIDENTS_RECORDED) {
        Some(incidents) => {
            let mut sums = Vec::with_capacity(groups.len());
            let mut means = Vec::with_capacity(groups.len());
            let mut counts = Vec::with_capacity(groups.len());
            for rows in groups.values() {
                let totals = Totals::over(incidents, rows);
                sums.push(totals.sum());
                means.push(totals.mean());
                counts.push(Cell::Int(totals.count as i64));
            }
            output.push(Column::new("incidents_recorded_sum", sums));
            output.push(Column::new("incidents_recorded_mean", means));
            output.push(Column::new("incidents_recorded_count", counts));
        }
        None => {
            let counts = groups
                .values()
                .map(|rows| Cell::Int(rows.len() as i64))
                .collect();
            output.push(Column::new("count", counts));
        }
    }

    Table::from_columns(output)
}

/// Incidents per offence division and year with year-over-year change.
///
/// Rows are ordered by division then year. `yoy_change` is the percentage
/// change from the previous year of the same division; it is missing for a
/// division's first year and when the previous total is zero.
pub fn offence_trends(table: &Table) -> Result<Table> {
    let division = table.require(columns::OFFENCE_DIVISION)?;
    let year = table.require(columns::YEAR)?;
    let incidents = table.require(columns::INCIDENTS_RECORDED)?;

    let groups = group_rows(table, &[division, year]);

    let mut years = Vec::with_capacity(groups.len());
    let mut divisions = Vec::with_capacity(groups.len());
    let mut totals = Vec::with_capacity(groups.len());
    let mut changes = Vec::with_capacity(groups.len());
    let mut previous: Option<(&Cell, f64)> = None;

    for (key, rows) in &groups {
        let total = Totals::over(incidents, rows);
        let current = total.value();
        let change = match previous {
            Some((last_division, last)) if last_division == &key[0] && last != 0.0 => {
                Cell::Float((current - last) / last * 100.0)
            }
            _ => Cell::Empty,
        };
        previous = Some((&key[0], current));

        divisions.push(key[0].clone());
        years.push(key[1].clone());
        totals.push(total.sum());
        changes.push(change);
    }

    Table::from_columns(vec![
        Column::new(columns::YEAR, years),
        Column::new(columns::OFFENCE_DIVISION, divisions),
        Column::new(columns::INCIDENTS_RECORDED, totals),
        Column::new("yoy_change", changes),
    ])
}

type Groups = BTreeMap<Vec<Cell>, Vec<usize>>;

/// Row indices per distinct key, skipping rows with any missing key cell.
fn group_rows(table: &Table, keys: &[&Column]) -> Groups {
    let mut groups = Groups::new();
    for row in 0..table.height() {
        let key: Vec<Cell> = keys.iter().map(|col| col.cells[row].clone()).collect();
        if key.iter().any(Cell::is_empty) {
            continue;
        }
        groups.entry(key).or_default().push(row);
    }
    groups
}

fn key_columns(keys: &[&Column], groups: &Groups) -> Vec<Column> {
    keys.iter()
        .enumerate()
        .map(|(index, column)| {
            let cells = groups.keys().map(|key| key[index].clone()).collect();
            Column::new(column.name.clone(), cells)
        })
        .collect()
}

/// Running numeric totals over a set of rows; non-numeric cells are skipped.
struct Totals {
    int_sum: i64,
    float_sum: f64,
    all_int: bool,
    count: usize,
}

impl Totals {
    fn over(column: &Column, rows: &[usize]) -> Self {
        let mut totals = Totals {
            int_sum: 0,
            float_sum: 0.0,
            all_int: true,
            count: 0,
        };
        for &row in rows {
            match &column.cells[row] {
                Cell::Int(value) => {
                    totals.int_sum = totals.int_sum.saturating_add(*value);
                    totals.float_sum += *value as f64;
                    totals.count += 1;
                }
                Cell::Float(value) => {
                    totals.all_int = false;
                    totals.float_sum += value;
                    totals.count += 1;
                }
                _ => {}
            }
        }
        totals
    }

    fn value(&self) -> f64 {
        self.float_sum
    }

    fn sum(&self) -> Cell {
        if self.all_int {
            Cell::Int(self.int_sum)
        } else {
            Cell::Float(self.float_sum)
        }
    }

    fn mean(&self) -> Cell {
        if self.count == 0 {
            Cell::Empty
        } else {
            Cell::Float(self.float_sum / self.count as f64)
        }
    }
}
