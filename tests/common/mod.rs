#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use vic_crime_series::catalog::Dataset;
use vic_crime_series::model::{Cell, Table};
use vic_crime_series::{CrimeDataProcessor, ProcessorConfig};

pub const MARCH_HEADER: &[&str] = &[
    "Year",
    "Year ending",
    "LGA_NAME",
    "Offence Division",
    "Incidents Recorded",
    "Rate per 100,000 population",
];

pub const SEPTEMBER_HEADER: &[&str] = &[
    "Year",
    "Year ending",
    "Police Region",
    "Local Government Area",
    "Offence Division",
    "Incidents Recorded",
    "Rate per 100,000 population",
];

pub const LGAS: &[&str] = &["Yarra", "Ballarat", "Alpine"];

/// One sheet of a fixture workbook.
pub struct Sheet<'a> {
    pub name: &'a str,
    pub header: &'a [&'a str],
    pub rows: Vec<Vec<Cell>>,
}

pub fn write_workbook(path: &Path, sheets: &[Sheet<'_>]) {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name).expect("sheet named");
        for (col, header) in sheet.header.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .expect("header written");
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Empty => {}
                    Cell::Int(value) => {
                        worksheet
                            .write_number(row_num, col, *value as f64)
                            .expect("number written");
                    }
                    Cell::Float(value) => {
                        worksheet
                            .write_number(row_num, col, *value)
                            .expect("number written");
                    }
                    Cell::Text(value) => {
                        worksheet
                            .write_string(row_num, col, value)
                            .expect("string written");
                    }
                }
            }
        }
    }
    workbook.save(path).expect("workbook saved");
}

/// Rows in the March-ending layout: one per year and LGA, division A.
pub fn march_rows(years: std::ops::RangeInclusive<i64>) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    for year in years {
        for (index, lga) in LGAS.iter().enumerate() {
            rows.push(vec![
                Cell::Int(year),
                Cell::from("March"),
                Cell::from(*lga),
                Cell::from("A Crimes against the person"),
                Cell::Int(100 + index as i64),
                Cell::Float(1234.5),
            ]);
        }
    }
    rows
}

/// Rows in the September-ending layout: one per year and LGA, division A.
pub fn september_rows(years: std::ops::RangeInclusive<i64>) -> Vec<Vec<Cell>> {
    let mut rows = Vec::new();
    for year in years {
        for (index, lga) in LGAS.iter().enumerate() {
            rows.push(vec![
                Cell::Int(year),
                Cell::from("September"),
                Cell::from("North West Metro"),
                Cell::from(*lga),
                Cell::from("A Crimes against the person"),
                Cell::Int(200 + index as i64),
                Cell::Float(2345.5),
            ]);
        }
    }
    rows
}

pub fn write_march_workbook(data_dir: &Path) {
    write_workbook(
        &data_dir.join(Dataset::CriminalIncidents2010_2019.file_name()),
        &[
            Sheet {
                name: "Contents",
                header: &["Table", "Description"],
                rows: vec![vec![Cell::from("Table 1"), Cell::from("Incidents")]],
            },
            Sheet {
                name: "Table 1",
                header: MARCH_HEADER,
                rows: march_rows(2010..=2019),
            },
        ],
    );
}

pub fn write_september_workbook(data_dir: &Path) {
    write_workbook(
        &data_dir.join(Dataset::CriminalIncidents2012_2021.file_name()),
        &[
            Sheet {
                name: "Contents",
                header: &["Table", "Description"],
                rows: vec![vec![Cell::from("Table 01"), Cell::from("LGA summary")]],
            },
            Sheet {
                name: "Table 01",
                header: SEPTEMBER_HEADER,
                rows: september_rows(2012..=2021),
            },
            Sheet {
                name: "Table 02",
                header: &["Year", "Local Government Area", "Police Service Area"],
                rows: vec![vec![
                    Cell::Int(2021),
                    Cell::from("Yarra"),
                    Cell::from("Yarra PSA"),
                ]],
            },
        ],
    );
}

/// A processor over a fresh temporary project with `Data/` created.
pub fn processor_in(temp_dir: &TempDir) -> CrimeDataProcessor {
    let config = ProcessorConfig::from_project_root(temp_dir.path());
    std::fs::create_dir_all(&config.data_dir).expect("data directory");
    CrimeDataProcessor::new(config).expect("processor created")
}

pub fn data_dir(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("Data")
}

/// Values of `column` as display strings.
pub fn strings(table: &Table, column: &str) -> Vec<String> {
    table
        .require(column)
        .expect("column present")
        .cells
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn table(header: &[&str], rows: Vec<Vec<Cell>>) -> Table {
    Table::from_rows(header.iter().map(|h| h.to_string()).collect(), rows)
        .expect("table built")
}

/// `true` when every value of `column` displays as `value`.
pub fn all_values(table: &Table, column: &str, value: &str) -> bool {
    strings(table, column).iter().all(|s| s == value)
}
