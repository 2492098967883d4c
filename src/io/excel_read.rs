use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};

use crate::error::{DataError, Result};
use crate::model::{Cell, Table};

/// Sheets that carry front matter rather than data in CSA workbooks.
pub const NON_DATA_SHEETS: &[&str] = &["contents", "notes", "metadata"];

/// Lists the sheet names of a workbook in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    Ok(workbook.sheet_names().to_owned())
}

/// Picks the first sheet that is not front matter, falling back to the first
/// sheet of the workbook.
pub fn first_data_sheet(sheets: &[String]) -> Option<&str> {
    sheets
        .iter()
        .find(|sheet| !NON_DATA_SHEETS.contains(&sheet.to_lowercase().as_str()))
        .or_else(|| sheets.first())
        .map(String::as_str)
}

/// Reads one sheet into a [`Table`]. The first row is the header.
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = read_required_sheet(&mut workbook, sheet)?;
    range_to_table(&range)
}

fn read_required_sheet<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    name: &str,
) -> Result<calamine::Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| DataError::InvalidWorkbook(format!("missing sheet '{name}'")))?;
    let range = range_result.map_err(DataError::from)?;
    Ok(range)
}

fn range_to_table(range: &calamine::Range<DataType>) -> Result<Table> {
    let mut rows = range.rows();
    let header = match rows.next() {
        Some(first_row) => header_names(first_row),
        None => return Ok(Table::new()),
    };

    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(data_to_cell).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    Table::from_rows(header, data)
}

/// Header cells become column names; blanks are named after their position
/// and repeated names get a numeric suffix.
pub(crate) fn header_names(row: &[DataType]) -> Vec<String> {
    let raw = row
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = cell_to_string(Some(cell)).trim().to_string();
            if name.is_empty() {
                format!("Unnamed: {index}")
            } else {
                name
            }
        })
        .collect();
    dedup_names(raw)
}

pub(crate) fn dedup_names(raw: Vec<String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn data_to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Int(value) => Cell::Int(*value),
        DataType::Float(value) => Cell::from_f64(*value),
        DataType::String(value) if value.trim().is_empty() => Cell::Empty,
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Empty | DataType::Error(_) => Cell::Empty,
        other => Cell::Text(cell_to_string(Some(other))),
    }
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => Cell::from_f64(*value).to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_data_sheet_skips_front_matter() {
        let sheets = vec![
            "Contents".to_string(),
            "NOTES".to_string(),
            "Table 1".to_string(),
        ];
        assert_eq!(first_data_sheet(&sheets), Some("Table 1"));

        let only_front = vec!["Contents".to_string(), "Metadata".to_string()];
        assert_eq!(first_data_sheet(&only_front), Some("Contents"));
        assert_eq!(first_data_sheet(&[]), None);
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        let names = dedup_names(vec!["Year".into(), "Year".into(), "Year".into()]);
        assert_eq!(names, vec!["Year", "Year.1", "Year.2"]);
    }
}
