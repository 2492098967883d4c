//! Static raw-header → canonical-name maps for each dataset vintage.

use tracing::debug;

use crate::error::Result;
use crate::model::{Cell, Column, Table, Vintage, columns};

/// Mapping for the September-ending 2012–2021 workbook.
pub const MAPPING_2012_2021: &[(&str, &str)] = &[
    ("Year", columns::YEAR),
    ("Year ending", columns::YEAR_ENDING),
    ("Police Region", columns::POLICE_REGION),
    ("Local Government Area", columns::LGA_NAME),
    ("Incidents Recorded", columns::INCIDENTS_RECORDED),
    ("Rate per 100,000 population", columns::RATE_PER_100000),
    ("Offence Division", columns::OFFENCE_DIVISION),
    ("Offence Subdivision", columns::OFFENCE_SUBDIVISION),
    ("Offence Subgroup", columns::OFFENCE_SUBGROUP),
    ("Police Service Area", columns::POLICE_SERVICE_AREA),
    ("Postcode", columns::POSTCODE),
    ("Suburb/Town Name", columns::SUBURB),
    ("Location Division", columns::LOCATION_DIVISION),
    ("Location Subdivision", columns::LOCATION_SUBDIVISION),
    ("Location Group", columns::LOCATION_GROUP),
    ("Charge Status", columns::CHARGE_STATUS),
];

/// Mapping for the March-ending 2010–2019 workbook. Several spellings of the
/// same field occur across releases, including already-canonical ones.
pub const MAPPING_2010_2019: &[(&str, &str)] = &[
    ("Year", columns::YEAR),
    ("Year ending", columns::YEAR_ENDING),
    ("LGA_CODE", columns::LGA_CODE),
    ("LGA_NAME", columns::LGA_NAME),
    ("lga_name", columns::LGA_NAME),
    ("Local Government Area", columns::LGA_NAME),
    ("Offence Division", columns::OFFENCE_DIVISION),
    ("Offence Subdivision", columns::OFFENCE_SUBDIVISION),
    ("Offence Subgroup", columns::OFFENCE_SUBGROUP),
    ("offence_division", columns::OFFENCE_DIVISION),
    ("Incidents Recorded", columns::INCIDENTS_RECORDED),
    ("incidents_recorded", columns::INCIDENTS_RECORDED),
    ("Rate per 100,000 population", columns::RATE_PER_100000),
    ("rate_per_100000", columns::RATE_PER_100000),
];

/// Returns the column mapping used for `vintage`.
pub fn mapping(vintage: Vintage) -> &'static [(&'static str, &'static str)] {
    match vintage {
        Vintage::V2010_2019 => MAPPING_2010_2019,
        Vintage::V2012_2021 => MAPPING_2012_2021,
    }
}

/// Canonical name for a raw header, if the vintage maps it.
pub fn canonical_name(vintage: Vintage, raw: &str) -> Option<&'static str> {
    mapping(vintage)
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, canonical)| *canonical)
}

/// Renames the mapped columns of `table` and coerces `year` to numbers.
///
/// Unknown columns pass through untouched. When two raw columns map to the
/// same canonical name the first one keeps its position and absorbs the
/// other's values where it has none.
pub fn standardize(table: Table, vintage: Vintage) -> Result<Table> {
    let mut renamed: Vec<Column> = Vec::with_capacity(table.width());

    for column in table.columns() {
        let name = canonical_name(vintage, &column.name).unwrap_or(&column.name);
        match renamed.iter_mut().find(|existing| existing.name == name) {
            Some(existing) => {
                debug!(column = %column.name, into = name, "coalescing duplicate column");
                for (target, source) in existing.cells.iter_mut().zip(&column.cells) {
                    if target.is_empty() {
                        *target = source.clone();
                    }
                }
            }
            None => renamed.push(Column::new(name, column.cells.clone())),
        }
    }

    if let Some(year) = renamed.iter_mut().find(|col| col.name == columns::YEAR) {
        year.cells = year.cells.iter().map(Cell::to_numeric).collect();
    }

    Table::from_columns(renamed)
}
