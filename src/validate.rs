//! Structural checks of the raw 2010–2019 workbook before it is loaded.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::Dataset;
use crate::error::{DataError, Result};
use crate::io::{self, csv_read, excel_read};
use crate::model::{Cell, Table};
use crate::processor::CrimeDataProcessor;

/// Years every complete 2010–2019 release should cover.
pub const EXPECTED_YEARS: std::ops::RangeInclusive<i64> = 2010..=2019;

/// Findings for one sheet of the raw workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetCheck {
    pub sheet: String,
    pub rows: usize,
    pub columns: Vec<String>,
    /// Distinct values of the raw `Year` column, if it has one.
    pub years: Option<Vec<i64>>,
    pub missing_years: Vec<i64>,
    pub lga_column: Option<String>,
    pub unique_lgas: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkbookCheck {
    pub path: PathBuf,
    pub sheets: Vec<SheetCheck>,
}

impl WorkbookCheck {
    /// `true` when some sheet lacks one of the expected years.
    pub fn has_warnings(&self) -> bool {
        self.sheets.iter().any(|s| !s.missing_years.is_empty())
    }
}

/// Inspects every sheet of the workbook except `contents`. A CSV file is
/// checked as a single sheet named after the file.
pub fn validate_workbook(path: &Path) -> Result<WorkbookCheck> {
    if io::is_flat_file(path) {
        let table = csv_read::read_csv(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(WorkbookCheck {
            path: path.to_path_buf(),
            sheets: vec![check_sheet(name, &table)],
        });
    }

    let sheet_names = excel_read::sheet_names(path)?;
    info!(path = %path.display(), sheets = ?sheet_names, "validating workbook");

    let mut sheets = Vec::new();
    for name in sheet_names {
        if name.eq_ignore_ascii_case("contents") {
            continue;
        }
        let table = excel_read::read_sheet(path, &name)?;
        sheets.push(check_sheet(name, &table));
    }

    Ok(WorkbookCheck {
        path: path.to_path_buf(),
        sheets,
    })
}

fn check_sheet(sheet: String, table: &Table) -> SheetCheck {
    let years = table.column("Year").map(|column| {
        column
            .cells
            .iter()
            .filter_map(|cell| cell.to_numeric().as_year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
    });
    let missing_years = match &years {
        Some(found) => EXPECTED_YEARS
            .filter(|year| found.binary_search(year).is_err())
            .collect(),
        None => Vec::new(),
    };
    if !missing_years.is_empty() {
        warn!(sheet = %sheet, missing = ?missing_years, "not all expected years (2010-2019) found");
    }

    let lga_column = table
        .columns()
        .iter()
        .find(|column| {
            let name = column.name.to_lowercase();
            name.contains("lga") || name.contains("local government")
        });
    let unique_lgas = lga_column.map(|column| {
        column
            .cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .collect::<BTreeSet<&Cell>>()
            .len()
    });

    SheetCheck {
        sheet,
        rows: table.height(),
        columns: table.column_names(),
        years,
        missing_years,
        lga_column: lga_column.map(|column| column.name.clone()),
        unique_lgas,
    }
}

impl CrimeDataProcessor {
    /// Validates the 2010–2019 workbook in the data directory.
    pub fn validate_2010_2019(&self) -> Result<WorkbookCheck> {
        let dataset = Dataset::CriminalIncidents2010_2019;
        let path = self.config().path_for(dataset);
        if !path.exists() {
            return Err(DataError::NotFound {
                path,
                hint: dataset.missing_hint(),
            });
        }
        validate_workbook(&path)
    }
}
