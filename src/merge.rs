//! Combines the March-ending and September-ending releases into one series.
//!
//! The overlap window is resolved by source, not by field: every year is
//! owned by exactly one release in the output. Rows the other release holds
//! for an owned year are dropped, including breakdowns the owner lacks.

use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::Dataset;
use crate::error::{DataError, Result};
use crate::model::{Table, Vintage, columns};
use crate::processor::CrimeDataProcessor;

/// Years seen in each release and where they overlap, all ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCoverage {
    pub march: Vec<i64>,
    pub september: Vec<i64>,
    pub overlapping: Vec<i64>,
}

impl YearCoverage {
    pub fn of(march: &Table, september: &Table) -> Self {
        let march = march.distinct_years(columns::YEAR);
        let september = september.distinct_years(columns::YEAR);
        let overlapping = march
            .iter()
            .copied()
            .filter(|year| september.binary_search(year).is_ok())
            .collect();
        Self {
            march,
            september,
            overlapping,
        }
    }
}

/// Merges the two releases.
///
/// With `prefer_september` every September row is kept and March rows
/// survive only for years before the first September year; otherwise every
/// March row is kept and September rows survive only for years after the
/// last March year. A single available release is returned unchanged. The
/// merged rows are sorted by year then LGA name.
pub fn merge_tables(
    march: Option<&Table>,
    september: Option<&Table>,
    prefer_september: bool,
) -> Result<Table> {
    let (march, september) = match (march, september) {
        (None, None) => return Err(DataError::NoDataAvailable),
        (Some(only), None) | (None, Some(only)) => return Ok(only.clone()),
        (Some(march), Some(september)) => (march, september),
    };
    march.require(columns::YEAR)?;
    september.require(columns::YEAR)?;

    let coverage = YearCoverage::of(march, september);
    info!(
        september_years = ?coverage.september,
        march_years = ?coverage.march,
        overlapping = ?coverage.overlapping,
        "year coverage"
    );

    let merged = if prefer_september {
        let early = match coverage.september.first() {
            Some(&first) => rows_where_year(march, |year| year < first as f64),
            None => rows_where_year(march, |_| true),
        };
        Table::concat(&[&early, september])
    } else {
        let late = match coverage.march.last() {
            Some(&last) => rows_where_year(september, |year| year > last as f64),
            None => rows_where_year(september, |_| true),
        };
        Table::concat(&[march, &late])
    };

    Ok(merged.sort_by_columns(&[columns::YEAR, columns::LGA_NAME]))
}

/// Rows with a numeric year accepted by `keep`. Missing years never match.
fn rows_where_year(table: &Table, keep: impl Fn(f64) -> bool) -> Table {
    let mask: Vec<bool> = match table.column(columns::YEAR) {
        Some(column) => column
            .cells
            .iter()
            .map(|cell| cell.as_f64().is_some_and(&keep))
            .collect(),
        None => vec![false; table.height()],
    };
    table.filter(&mask)
}

impl CrimeDataProcessor {
    /// Builds the extended 2010–2021 series, loading either release on demand.
    ///
    /// A missing file for one release degrades to the other release alone;
    /// [`DataError::NoDataAvailable`] is returned only when both are missing.
    #[instrument(level = "info", skip(self))]
    pub fn merge_time_series(&mut self, prefer_september: bool) -> Result<Table> {
        self.ensure_loaded(Vintage::V2012_2021)?;
        self.ensure_loaded(Vintage::V2010_2019)?;

        let merged = merge_tables(
            self.loaded(Dataset::CriminalIncidents2010_2019),
            self.loaded(Dataset::CriminalIncidents2012_2021),
            prefer_september,
        )?;
        info!(rows = merged.height(), "merged time series");
        Ok(merged)
    }

    /// Year coverage of the two cached releases, when both are loaded.
    pub fn year_coverage(&self) -> Option<YearCoverage> {
        Some(YearCoverage::of(
            self.loaded(Dataset::CriminalIncidents2010_2019)?,
            self.loaded(Dataset::CriminalIncidents2012_2021)?,
        ))
    }
}
